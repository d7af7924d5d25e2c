use review_core::{
    DbError, DbResult, EmployeeId, EmployeeLookup, RepoError, Review, ReviewValidationError,
};
use std::collections::HashSet;

fn roster() -> HashSet<EmployeeId> {
    [1, 2].into_iter().collect()
}

struct UnreachableEmployees;

impl EmployeeLookup for UnreachableEmployees {
    fn employee_exists(&self, _id: EmployeeId) -> DbResult<bool> {
        Err(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }
}

#[test]
fn new_review_starts_unsaved() {
    let review = Review::new(2023, "Good work", 1, &roster()).unwrap();

    assert_eq!(review.id(), None);
    assert!(!review.is_persisted());
    assert_eq!(review.year(), 2023);
    assert_eq!(review.summary(), "Good work");
    assert_eq!(review.employee_id(), 1);
}

#[test]
fn year_must_be_2000_or_later() {
    let err = Review::new(1999, "x", 1, &roster()).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ReviewValidationError::YearTooEarly { year: 1999, .. })
    ));

    assert!(Review::new(2000, "x", 1, &roster()).is_ok());
    assert!(Review::new(2087, "x", 1, &roster()).is_ok());
}

#[test]
fn summary_must_not_be_blank() {
    for blank in ["", "   ", "\t\n "] {
        let err = Review::new(2021, blank, 1, &roster()).unwrap_err();
        assert!(
            matches!(err, RepoError::Validation(ReviewValidationError::EmptySummary)),
            "blank summary {blank:?} was accepted"
        );
    }
}

#[test]
fn summary_is_stored_untrimmed() {
    let review = Review::new(2021, "  padded  ", 1, &roster()).unwrap();
    assert_eq!(review.summary(), "  padded  ");
}

#[test]
fn employee_id_must_be_positive_and_known() {
    for bad in [0, -3] {
        let err = Review::new(2021, "x", bad, &roster()).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ReviewValidationError::NonPositiveEmployeeId(id)) if id == bad
        ));
    }

    let err = Review::new(2021, "x", 99, &roster()).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ReviewValidationError::UnknownEmployee(99))
    ));

    assert!(Review::new(2021, "x", 2, &roster()).is_ok());
}

#[test]
fn first_invalid_field_in_declaration_order_is_reported() {
    let err = Review::new(1990, "", 0, &roster()).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ReviewValidationError::YearTooEarly { year: 1990, .. })
    ));

    let err = Review::new(2020, "", 0, &roster()).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ReviewValidationError::EmptySummary)
    ));
}

#[test]
fn failed_setters_leave_fields_untouched() {
    let employees = roster();
    let mut review = Review::new(2021, "steady", 1, &employees).unwrap();

    assert_eq!(
        review.set_year(1800).unwrap_err(),
        ReviewValidationError::YearTooEarly {
            year: 1800,
            min: 2000
        }
    );
    assert_eq!(
        review.set_summary(" ").unwrap_err(),
        ReviewValidationError::EmptySummary
    );
    assert!(review.set_employee_id(42, &employees).is_err());

    assert_eq!(review.year(), 2021);
    assert_eq!(review.summary(), "steady");
    assert_eq!(review.employee_id(), 1);

    review.set_year(2024).unwrap();
    review.set_summary("improved").unwrap();
    review.set_employee_id(2, &employees).unwrap();
    assert_eq!(review.year(), 2024);
    assert_eq!(review.summary(), "improved");
    assert_eq!(review.employee_id(), 2);
}

#[test]
fn lookup_failure_surfaces_as_db_error() {
    let err = Review::new(2021, "x", 1, &UnreachableEmployees).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn display_matches_record_layout() {
    let review = Review::new(2021, "Solid performer", 1, &roster()).unwrap();
    assert_eq!(
        review.to_string(),
        "<Review None: 2021, Solid performer, Employee: 1>"
    );
}

#[test]
fn validation_messages_name_the_rule() {
    assert_eq!(
        ReviewValidationError::YearTooEarly {
            year: 1999,
            min: 2000
        }
        .to_string(),
        "year must be 2000 or later, got 1999"
    );
    assert_eq!(
        ReviewValidationError::NotAnInteger { field: "year" }.to_string(),
        "year must be an integer"
    );
    assert_eq!(
        ReviewValidationError::UnknownEmployee(7).to_string(),
        "employee 7 does not exist"
    );
}

#[test]
fn review_serializes_with_expected_fields() {
    let review = Review::new(2022, "Reliable", 2, &roster()).unwrap();

    let json = serde_json::to_value(&review).unwrap();
    assert_eq!(json["id"], serde_json::Value::Null);
    assert_eq!(json["year"], 2022);
    assert_eq!(json["summary"], "Reliable");
    assert_eq!(json["employee_id"], 2);
}
