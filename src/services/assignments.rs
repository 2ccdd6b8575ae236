//! Student laptop assignment service

use crate::{
    error::{AppError, AppResult},
    models::{
        pagination::normalize_filter,
        student_laptop::{AssignLaptop, StudentQuery},
        Page, PageRequest, Pagination, StudentFilter, StudentLaptop,
    },
    repository::Repository,
    services::export::{self, Report},
};

#[derive(Clone)]
pub struct AssignmentService {
    repository: Repository,
    max_limit: i64,
}

impl AssignmentService {
    pub fn new(repository: Repository, max_limit: i64) -> Self {
        Self {
            repository,
            max_limit,
        }
    }

    /// Assign an inventoried laptop to a student.
    ///
    /// The laptop must have been scanned into inventory first, and an ELCOT
    /// number can only be held by one student. Both checks run before the
    /// insert; a concurrent assignment that slips past them is still refused
    /// by the store's unique constraint.
    pub async fn assign(&self, request: &AssignLaptop) -> AppResult<StudentLaptop> {
        let new = request.normalize()?;

        if self
            .repository
            .laptops
            .find_by_elcot_number(&new.elcot_number)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Laptop with ELCOT number {} is not in inventory. Scan the laptop first.",
                new.elcot_number
            )));
        }

        if let Some(existing) = self
            .repository
            .students
            .find_by_elcot_number(&new.elcot_number)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "ELCOT number {} is already assigned to {}",
                existing.elcot_number, existing.student_name
            )));
        }

        let assignment = self.repository.students.insert(&new).await?;
        tracing::info!(
            assignment_id = %assignment.id,
            "Assigned elcot={} to {} ({}, year {})",
            assignment.elcot_number,
            assignment.student_name,
            assignment.department,
            assignment.year
        );
        Ok(assignment)
    }

    /// Search assignments, newest first
    pub async fn list(&self, query: &StudentQuery) -> AppResult<Page<StudentLaptop>> {
        let filter = StudentFilter {
            search: normalize_filter(query.search.as_deref()),
            department: normalize_filter(query.department.as_deref()),
        };
        let request = PageRequest::new(query.page, query.limit, self.max_limit);

        let (items, total) = tokio::try_join!(
            self.repository.students.find_many(&filter, Some(request)),
            self.repository.students.count(&filter),
        )?;

        Ok(Page {
            items,
            pagination: Pagination::new(total, request),
        })
    }

    /// Every assignment as a spreadsheet
    pub async fn export(&self) -> AppResult<Report> {
        let students = self
            .repository
            .students
            .find_many(&StudentFilter::default(), None)
            .await?;
        export::student_report(&students)
    }
}
