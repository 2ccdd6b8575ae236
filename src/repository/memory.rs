//! In-memory store used by the service and router tests

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{LaptopStore, Repository, StudentLaptopStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        laptop::LaptopField, Laptop, LaptopFilter, NewLaptop, NewStudentLaptop, PageRequest,
        StudentFilter, StudentLaptop,
    },
};

#[derive(Default)]
struct State {
    laptops: Vec<Laptop>,
    students: Vec<StudentLaptop>,
}

impl State {
    fn with_inventory_flag(&self, mut row: StudentLaptop) -> StudentLaptop {
        row.in_inventory = self
            .laptops
            .iter()
            .any(|l| l.elcot_number == row.elcot_number);
        row
    }
}

/// Case-insensitive substring test, the in-process twin of `ILIKE '%..%'`
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn laptop_matches(laptop: &Laptop, filter: &LaptopFilter) -> bool {
    match filter.search.as_deref() {
        Some(search) => {
            contains_ignore_case(&laptop.serial_number, search)
                || contains_ignore_case(&laptop.elcot_number, search)
        }
        None => true,
    }
}

/// Search and department are ANDed
fn student_matches(row: &StudentLaptop, filter: &StudentFilter) -> bool {
    let search_ok = match filter.search.as_deref() {
        Some(search) => {
            contains_ignore_case(&row.elcot_number, search)
                || contains_ignore_case(&row.student_name, search)
        }
        None => true,
    };
    let department_ok = match filter.department.as_deref() {
        Some(department) => row.department == department,
        None => true,
    };
    search_ok && department_ok
}

/// Newest first; later inserts win timestamp ties
fn newest_first<T: Clone>(
    rows: &[T],
    created_at: impl Fn(&T) -> chrono::DateTime<Utc>,
    keep: impl Fn(&T) -> bool,
    page: Option<PageRequest>,
) -> Vec<T> {
    let mut matching: Vec<T> = rows.iter().rev().filter(|r| keep(r)).cloned().collect();
    matching.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    match page {
        Some(page) => matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect(),
        None => matching,
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository(&self) -> Repository {
        Repository::from_stores(Arc::new(self.clone()), Arc::new(self.clone()))
    }

    pub fn laptop_count(&self) -> usize {
        self.lock().laptops.len()
    }

    pub fn student_count(&self) -> usize {
        self.lock().students.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl LaptopStore for MemoryStore {
    async fn insert(&self, laptop: &NewLaptop) -> AppResult<Laptop> {
        let mut state = self.lock();
        if state
            .laptops
            .iter()
            .any(|l| l.serial_number == laptop.serial_number)
        {
            return Err(LaptopField::SerialNumber.conflict());
        }
        if state
            .laptops
            .iter()
            .any(|l| l.elcot_number == laptop.elcot_number)
        {
            return Err(LaptopField::ElcotNumber.conflict());
        }

        let row = Laptop {
            id: Uuid::new_v4(),
            serial_number: laptop.serial_number.clone(),
            elcot_number: laptop.elcot_number.clone(),
            created_at: Utc::now(),
        };
        state.laptops.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Laptop>> {
        Ok(self.lock().laptops.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_elcot_number(&self, elcot_number: &str) -> AppResult<Option<Laptop>> {
        Ok(self
            .lock()
            .laptops
            .iter()
            .find(|l| l.elcot_number == elcot_number)
            .cloned())
    }

    async fn find_many(
        &self,
        filter: &LaptopFilter,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<Laptop>> {
        let state = self.lock();
        Ok(newest_first(
            &state.laptops,
            |l| l.created_at,
            |l| laptop_matches(l, filter),
            page,
        ))
    }

    async fn count(&self, filter: &LaptopFilter) -> AppResult<i64> {
        Ok(self.lock().laptops.iter().filter(|l| laptop_matches(l, filter)).count() as i64)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.lock();
        let before = state.laptops.len();
        state.laptops.retain(|l| l.id != id);
        Ok(state.laptops.len() < before)
    }
}

#[async_trait]
impl StudentLaptopStore for MemoryStore {
    async fn insert(&self, assignment: &NewStudentLaptop) -> AppResult<StudentLaptop> {
        let mut state = self.lock();
        if state
            .students
            .iter()
            .any(|s| s.elcot_number == assignment.elcot_number)
        {
            return Err(AppError::Conflict(
                "This ELCOT number is already assigned to a student".to_string(),
            ));
        }

        let row = state.with_inventory_flag(StudentLaptop {
            id: Uuid::new_v4(),
            elcot_number: assignment.elcot_number.clone(),
            student_name: assignment.student_name.clone(),
            department: assignment.department.clone(),
            year: assignment.year.clone(),
            created_at: Utc::now(),
            in_inventory: false,
        });
        state.students.push(row.clone());
        Ok(row)
    }

    async fn find_by_elcot_number(
        &self,
        elcot_number: &str,
    ) -> AppResult<Option<StudentLaptop>> {
        let state = self.lock();
        Ok(state
            .students
            .iter()
            .find(|s| s.elcot_number == elcot_number)
            .cloned()
            .map(|row| state.with_inventory_flag(row)))
    }

    async fn find_many(
        &self,
        filter: &StudentFilter,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<StudentLaptop>> {
        let state = self.lock();
        Ok(newest_first(
            &state.students,
            |s| s.created_at,
            |s| student_matches(s, filter),
            page,
        )
        .into_iter()
        .map(|row| state.with_inventory_flag(row))
        .collect())
    }

    async fn count(&self, filter: &StudentFilter) -> AppResult<i64> {
        Ok(self.lock().students.iter().filter(|s| student_matches(s, filter)).count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(department: &str) -> StudentLaptop {
        StudentLaptop {
            id: Uuid::new_v4(),
            elcot_number: "ELC-100".to_string(),
            student_name: "Priya Raman".to_string(),
            department: department.to_string(),
            year: "2".to_string(),
            created_at: Utc::now(),
            in_inventory: true,
        }
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("ELCOT-0042", "elcot"));
        assert!(!contains_ignore_case("ELCOT-0042", "0043"));
    }

    #[test]
    fn test_laptop_search_covers_both_numbers() {
        let laptop = Laptop {
            id: Uuid::new_v4(),
            serial_number: "PF3XK9".to_string(),
            elcot_number: "ELC-7".to_string(),
            created_at: Utc::now(),
        };
        let search = |s: &str| LaptopFilter {
            search: Some(s.to_string()),
        };
        assert!(laptop_matches(&laptop, &search("xk9")));
        assert!(laptop_matches(&laptop, &search("elc-7")));
        assert!(!laptop_matches(&laptop, &search("ELC-8")));
        assert!(laptop_matches(&laptop, &LaptopFilter::default()));
    }

    #[test]
    fn test_student_filter_combines_with_and() {
        let row = assignment("CSB");
        let by_name = StudentFilter {
            search: Some("priya".into()),
            department: None,
        };
        assert!(student_matches(&row, &by_name));

        let wrong_department = StudentFilter {
            search: Some("priya".into()),
            department: Some("EEE".into()),
        };
        assert!(!student_matches(&row, &wrong_department));

        let by_elcot_and_department = StudentFilter {
            search: Some("elc-1".into()),
            department: Some("CSB".into()),
        };
        assert!(student_matches(&row, &by_elcot_and_department));
    }

    #[test]
    fn test_department_match_is_exact() {
        let row = assignment("AI & DS");
        let filter = StudentFilter {
            search: None,
            department: Some("AI".into()),
        };
        assert!(!student_matches(&row, &filter));
    }
}
