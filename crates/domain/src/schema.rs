// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The output shape requested from the generation collaborator.
//!
//! The prompt builder declares this schema and the normalizer reads these
//! field names; both sides go through the constants below so the two can
//! never disagree about what a schedule looks like.

use serde_json::{Value, json};

/// Top-level schedule fields.
pub mod schedule {
    /// Human-readable schedule title.
    pub const SCHEDULE_NAME: &str = "scheduleName";
    /// Self-reported show length; never trusted.
    pub const TOTAL_DURATION_MINUTES: &str = "totalDurationMinutes";
    /// Designer slots.
    pub const SLOTS: &str = "slots";
    /// Changeovers between consecutive slots.
    pub const TRANSITIONS: &str = "transitions";
    /// Backstage call sheet.
    pub const BACKSTAGE_CALLS: &str = "backstageCalls";
    /// Advisory quality score.
    pub const OPTIMIZATION_SCORE: &str = "optimizationScore";
    /// Free-text explanation.
    pub const REASONING: &str = "reasoning";

    /// Fields the collaborator must always return.
    pub const REQUIRED: [&str; 3] = [SLOTS, TRANSITIONS, BACKSTAGE_CALLS];
}

/// Fields of each element of `slots`.
pub mod slot {
    pub const DESIGNER_NAME: &str = "designerName";
    pub const SLOT_START: &str = "slotStart";
    pub const SLOT_END: &str = "slotEnd";
    pub const LOOKS_COUNT: &str = "looksCount";
    pub const BACKSTAGE_TIME: &str = "backstageTime";

    pub const REQUIRED: [&str; 5] = [
        DESIGNER_NAME,
        SLOT_START,
        SLOT_END,
        LOOKS_COUNT,
        BACKSTAGE_TIME,
    ];
}

/// Fields of each element of `transitions`.
pub mod transition {
    pub const FROM_DESIGNER: &str = "fromDesigner";
    pub const TO_DESIGNER: &str = "toDesigner";
    pub const DURATION_MINUTES: &str = "durationMinutes";

    pub const REQUIRED: [&str; 3] = [FROM_DESIGNER, TO_DESIGNER, DURATION_MINUTES];
}

/// Fields of each element of `backstageCalls`.
pub mod backstage_call {
    pub const DESIGNER: &str = "designer";
    pub const CALL_TIME: &str = "callTime";
    pub const NOTES: &str = "notes";

    pub const REQUIRED: [&str; 2] = [DESIGNER, CALL_TIME];
}

/// Pattern every wall-clock field must match.
pub const WALL_CLOCK_PATTERN: &str = "^([01][0-9]|2[0-3]):[0-5][0-9]$";

/// Builds the JSON Schema declaration sent alongside the prompt.
///
/// # Arguments
///
/// * `designer_names` - Requested designer names, one per slot. Repeated
///   names appear once in the enum on every designer-valued field
/// * `buffer_minutes` - The minimum transition length
#[must_use]
pub fn output_schema(designer_names: &[&str], buffer_minutes: u32) -> Value {
    let wall_clock: Value = json!({ "type": "string", "pattern": WALL_CLOCK_PATTERN });
    let mut distinct_names: Vec<&str> = Vec::with_capacity(designer_names.len());
    for &name in designer_names {
        if !distinct_names.contains(&name) {
            distinct_names.push(name);
        }
    }
    let designer_name: Value = json!({ "type": "string", "enum": distinct_names });

    json!({
        "type": "object",
        "properties": {
            schedule::SCHEDULE_NAME: { "type": "string" },
            schedule::TOTAL_DURATION_MINUTES: { "type": "integer", "minimum": 0 },
            schedule::SLOTS: {
                "type": "array",
                "minItems": designer_names.len(),
                "maxItems": designer_names.len(),
                "items": {
                    "type": "object",
                    "properties": {
                        slot::DESIGNER_NAME: designer_name,
                        slot::SLOT_START: wall_clock,
                        slot::SLOT_END: wall_clock,
                        slot::LOOKS_COUNT: { "type": "integer", "minimum": 1 },
                        slot::BACKSTAGE_TIME: wall_clock,
                    },
                    "required": slot::REQUIRED,
                },
            },
            schedule::TRANSITIONS: {
                "type": "array",
                "minItems": designer_names.len().saturating_sub(1),
                "maxItems": designer_names.len().saturating_sub(1),
                "items": {
                    "type": "object",
                    "properties": {
                        transition::FROM_DESIGNER: designer_name,
                        transition::TO_DESIGNER: designer_name,
                        transition::DURATION_MINUTES: {
                            "type": "integer",
                            "minimum": buffer_minutes,
                        },
                    },
                    "required": transition::REQUIRED,
                },
            },
            schedule::BACKSTAGE_CALLS: {
                "type": "array",
                "minItems": designer_names.len(),
                "items": {
                    "type": "object",
                    "properties": {
                        backstage_call::DESIGNER: designer_name,
                        backstage_call::CALL_TIME: wall_clock,
                        backstage_call::NOTES: { "type": "string" },
                    },
                    "required": backstage_call::REQUIRED,
                },
            },
            schedule::OPTIMIZATION_SCORE: { "type": "integer", "minimum": 0, "maximum": 100 },
            schedule::REASONING: { "type": "string" },
        },
        "required": schedule::REQUIRED,
    })
}
