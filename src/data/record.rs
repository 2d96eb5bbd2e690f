use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// Column names and widget bounds
// ---------------------------------------------------------------------------

pub const COL_SEM2_GRADE: &str = "Curricular_units_2nd_sem_grade";
pub const COL_SEM2_APPROVED: &str = "Curricular_units_2nd_sem_approved";
pub const COL_SEM1_GRADE: &str = "Curricular_units_1st_sem_grade";
pub const COL_TUITION_UP_TO_DATE: &str = "Tuition_fees_up_to_date";
pub const COL_SEM1_APPROVED: &str = "Curricular_units_1st_sem_approved";
pub const COL_AGE_AT_ENROLLMENT: &str = "Age_at_enrollment";

/// Column order of the one-row table produced by the form.
pub const RECORD_COLUMNS: [&str; 6] = [
    COL_SEM2_GRADE,
    COL_SEM2_APPROVED,
    COL_SEM1_GRADE,
    COL_TUITION_UP_TO_DATE,
    COL_SEM1_APPROVED,
    COL_AGE_AT_ENROLLMENT,
];

pub const GRADE_RANGE: RangeInclusive<f64> = 0.0..=20.0;
pub const GRADE_STEP: f64 = 0.1;
pub const APPROVED_RANGE: RangeInclusive<u32> = 0..=20;
pub const AGE_RANGE: RangeInclusive<u32> = 15..=50;

// ---------------------------------------------------------------------------
// StudentRecord – one prediction request
// ---------------------------------------------------------------------------

/// The six attributes collected by the form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentRecord {
    pub sem2_grade: f64,
    pub sem2_approved: u32,
    pub sem1_grade: f64,
    pub tuition_up_to_date: bool,
    pub sem1_approved: u32,
    pub age_at_enrollment: u32,
}

impl Default for StudentRecord {
    /// Every field starts at the lower bound of its widget.
    fn default() -> Self {
        Self {
            sem2_grade: *GRADE_RANGE.start(),
            sem2_approved: *APPROVED_RANGE.start(),
            sem1_grade: *GRADE_RANGE.start(),
            tuition_up_to_date: false,
            sem1_approved: *APPROVED_RANGE.start(),
            age_at_enrollment: *AGE_RANGE.start(),
        }
    }
}

impl StudentRecord {
    /// The record as an ordered `(column, value)` row.
    pub fn columns(&self) -> Vec<(&'static str, f64)> {
        let values = [
            self.sem2_grade,
            f64::from(self.sem2_approved),
            self.sem1_grade,
            f64::from(self.tuition_code()),
            f64::from(self.sem1_approved),
            f64::from(self.age_at_enrollment),
        ];
        RECORD_COLUMNS.iter().copied().zip(values).collect()
    }

    /// Copy of the record with every field forced into its widget range.
    pub fn clamped(&self) -> Self {
        Self {
            sem2_grade: clamp_grade(self.sem2_grade),
            sem2_approved: clamp_u32(self.sem2_approved, &APPROVED_RANGE),
            sem1_grade: clamp_grade(self.sem1_grade),
            tuition_up_to_date: self.tuition_up_to_date,
            sem1_approved: clamp_u32(self.sem1_approved, &APPROVED_RANGE),
            age_at_enrollment: clamp_u32(self.age_at_enrollment, &AGE_RANGE),
        }
    }

    /// Tuition flag as the 0/1 code shown in the selector.
    pub fn tuition_code(&self) -> u8 {
        u8::from(self.tuition_up_to_date)
    }
}

fn clamp_grade(v: f64) -> f64 {
    // NaN collapses to the lower bound.
    if v.is_nan() {
        return *GRADE_RANGE.start();
    }
    v.clamp(*GRADE_RANGE.start(), *GRADE_RANGE.end())
}

fn clamp_u32(v: u32, range: &RangeInclusive<u32>) -> u32 {
    v.clamp(*range.start(), *range.end())
}
