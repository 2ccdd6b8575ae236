//! Spreadsheet report generation

use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};

use crate::{
    error::{AppError, AppResult},
    models::{Laptop, StudentLaptop},
};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Generated workbook ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct Report {
    pub filename: String,
    pub bytes: Vec<u8>,
}

const LAPTOP_COLUMNS: &[(&str, f64)] = &[
    ("Serial Number", 25.0),
    ("ELCOT Number", 25.0),
    ("Created At", 20.0),
];

const STUDENT_COLUMNS: &[(&str, f64)] = &[
    ("ELCOT Number", 25.0),
    ("Student Name", 30.0),
    ("Department", 20.0),
    ("Year", 10.0),
    ("Assigned At", 20.0),
];

fn timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn filename(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}.xlsx", prefix, now.format("%Y-%m-%d"))
}

fn build_workbook(
    sheet_name: &str,
    columns: &[(&str, f64)],
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xE0E0E0));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, (title, width)) in columns.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, *width)?;
        worksheet.write_string_with_format(0, col, *title, &header)?;
    }

    for (idx, row) in rows.enumerate() {
        let row_num = idx as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            worksheet.write_string(row_num, col as u16, value)?;
        }
    }

    workbook.save_to_buffer()
}

fn report_error(e: XlsxError) -> AppError {
    AppError::Internal(format!("Failed to generate Excel report: {}", e))
}

/// Laptop inventory workbook
pub fn laptop_report(laptops: &[Laptop]) -> AppResult<Report> {
    let rows = laptops.iter().map(|l| {
        vec![
            l.serial_number.clone(),
            l.elcot_number.clone(),
            timestamp(&l.created_at),
        ]
    });

    let bytes = build_workbook("Laptop Inventory", LAPTOP_COLUMNS, rows).map_err(report_error)?;
    Ok(Report {
        filename: filename("laptop-inventory", Utc::now()),
        bytes,
    })
}

/// Student assignment workbook
pub fn student_report(students: &[StudentLaptop]) -> AppResult<Report> {
    let rows = students.iter().map(|s| {
        vec![
            s.elcot_number.clone(),
            s.student_name.clone(),
            s.department.clone(),
            s.year.clone(),
            timestamp(&s.created_at),
        ]
    });

    let bytes = build_workbook("Student Laptop Assignments", STUDENT_COLUMNS, rows)
        .map_err(report_error)?;
    Ok(Report {
        filename: filename("student-assignments", Utc::now()),
        bytes,
    })
}
