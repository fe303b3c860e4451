// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DEFAULT_BUFFER_MINUTES, DesignerInput, RequestWarning, ScheduleRequest, ValidatedRequest,
    ValidationError, validate_request,
};

fn create_test_schedule_request(designers: Vec<DesignerInput>) -> ScheduleRequest {
    ScheduleRequest {
        event_id: Some(String::from("evt-spring-26")),
        designers,
        buffer_minutes: None,
    }
}

#[test]
fn test_validate_request_accepts_valid_request() {
    let request: ScheduleRequest = create_test_schedule_request(vec![
        DesignerInput::new("Ana", 8),
        DesignerInput::new("Luis", 6),
    ]);

    let validated: ValidatedRequest = validate_request(&request).unwrap();
    assert_eq!(validated.event_id.value(), "evt-spring-26");
    assert_eq!(validated.designers.len(), 2);
    assert_eq!(validated.buffer_minutes, DEFAULT_BUFFER_MINUTES);
    assert_eq!(validated.total_looks(), 14);
    assert!(validated.warnings.is_empty());
}

#[test]
fn test_validate_request_rejects_missing_event_id() {
    let mut request: ScheduleRequest =
        create_test_schedule_request(vec![DesignerInput::new("Ana", 8)]);
    request.event_id = None;

    let result: Result<ValidatedRequest, ValidationError> = validate_request(&request);
    assert_eq!(result, Err(ValidationError::MissingEventId));
}

#[test]
fn test_validate_request_rejects_blank_event_id() {
    let mut request: ScheduleRequest =
        create_test_schedule_request(vec![DesignerInput::new("Ana", 8)]);
    request.event_id = Some(String::from("   "));

    let result: Result<ValidatedRequest, ValidationError> = validate_request(&request);
    assert_eq!(result, Err(ValidationError::MissingEventId));
}

#[test]
fn test_validate_request_rejects_empty_designer_list() {
    let request: ScheduleRequest = create_test_schedule_request(Vec::new());

    let result: Result<ValidatedRequest, ValidationError> = validate_request(&request);
    assert_eq!(result, Err(ValidationError::EmptyDesignerList));
}

#[test]
fn test_validate_request_rejects_list_of_only_unusable_designers() {
    let request: ScheduleRequest = create_test_schedule_request(vec![
        DesignerInput::new("  ", 8),
        DesignerInput::new("Luis", 0),
        DesignerInput {
            name: None,
            looks_count: 4,
        },
    ]);

    let result: Result<ValidatedRequest, ValidationError> = validate_request(&request);
    assert_eq!(result, Err(ValidationError::EmptyDesignerList));
}

#[test]
fn test_validate_request_drops_unusable_designers_with_warnings() {
    let request: ScheduleRequest = create_test_schedule_request(vec![
        DesignerInput::new("Ana", 8),
        DesignerInput::new("", 5),
        DesignerInput::new("Luis", -2),
        DesignerInput::new("  Maria  ", 3),
    ]);

    let validated: ValidatedRequest = validate_request(&request).unwrap();
    let names: Vec<&str> = validated
        .designers
        .iter()
        .map(|designer| designer.name.as_str())
        .collect();
    assert_eq!(names, vec!["Ana", "Maria"]);
    assert_eq!(
        validated.warnings,
        vec![
            RequestWarning::BlankDesignerName { index: 1 },
            RequestWarning::NonPositiveLooksCount {
                index: 2,
                looks_count: -2
            },
        ]
    );
}

#[test]
fn test_validate_request_keeps_duplicate_names_with_warning() {
    let request: ScheduleRequest = create_test_schedule_request(vec![
        DesignerInput::new("Ana", 8),
        DesignerInput::new("Luis", 6),
        DesignerInput::new("Ana", 4),
    ]);

    let validated: ValidatedRequest = validate_request(&request).unwrap();
    assert_eq!(validated.designers.len(), 3);
    assert_eq!(
        validated.warnings,
        vec![RequestWarning::DuplicateDesignerName {
            name: String::from("Ana"),
            occurrences: 2
        }]
    );
}

#[test]
fn test_validate_request_accepts_buffer_bounds() {
    for buffer in [1, 15] {
        let mut request: ScheduleRequest =
            create_test_schedule_request(vec![DesignerInput::new("Ana", 8)]);
        request.buffer_minutes = Some(buffer);

        let validated: ValidatedRequest = validate_request(&request).unwrap();
        assert_eq!(i64::from(validated.buffer_minutes), buffer);
    }
}

#[test]
fn test_validate_request_rejects_buffer_out_of_range() {
    for buffer in [0, 16, -3] {
        let mut request: ScheduleRequest =
            create_test_schedule_request(vec![DesignerInput::new("Ana", 8)]);
        request.buffer_minutes = Some(buffer);

        let result: Result<ValidatedRequest, ValidationError> = validate_request(&request);
        assert!(matches!(
            result,
            Err(ValidationError::BufferOutOfRange { buffer_minutes, min: 1, max: 15 }) if buffer_minutes == buffer
        ));
    }
}

#[test]
fn test_validation_error_reports_field() {
    assert_eq!(ValidationError::MissingEventId.field(), "event_id");
    assert_eq!(ValidationError::EmptyDesignerList.field(), "designers");
    assert_eq!(
        ValidationError::BufferOutOfRange {
            buffer_minutes: 0,
            min: 1,
            max: 15
        }
        .field(),
        "buffer_time"
    );
}
