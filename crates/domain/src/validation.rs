// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ValidationError;
use crate::types::{
    DEFAULT_BUFFER_MINUTES, Designer, EventId, MAX_BUFFER_MINUTES, MIN_BUFFER_MINUTES,
    RequestWarning, ScheduleRequest, ValidatedRequest,
};
use std::collections::BTreeMap;

/// Validates a schedule request before any external call is made.
///
/// This function is pure and deterministic. Designer entries with a blank
/// name or a non-positive looks count are dropped and reported as warnings;
/// repeated names are kept and reported as warnings.
///
/// # Arguments
///
/// * `request` - The raw request as submitted by the caller
///
/// # Returns
///
/// * `Ok(ValidatedRequest)` with trimmed designers and the effective buffer
/// * `Err(ValidationError)` if the request cannot be scheduled
///
/// # Errors
///
/// Returns an error if:
/// - The event identifier is absent or blank
/// - The buffer is supplied and outside `[1, 15]`
/// - No designer entries remain after dropping unusable ones
pub fn validate_request(request: &ScheduleRequest) -> Result<ValidatedRequest, ValidationError> {
    // Rule: event identifier must be present and non-blank
    let event_id: EventId = match request.event_id.as_deref() {
        Some(raw) if !raw.trim().is_empty() => EventId::new(raw),
        _ => return Err(ValidationError::MissingEventId),
    };

    // Rule: buffer defaults to 5 and must lie within [1, 15]
    let buffer_minutes: u32 = match request.buffer_minutes {
        None => DEFAULT_BUFFER_MINUTES,
        Some(raw) => u32::try_from(raw)
            .ok()
            .filter(|minutes| (MIN_BUFFER_MINUTES..=MAX_BUFFER_MINUTES).contains(minutes))
            .ok_or(ValidationError::BufferOutOfRange {
                buffer_minutes: raw,
                min: MIN_BUFFER_MINUTES,
                max: MAX_BUFFER_MINUTES,
            })?,
    };

    let mut warnings: Vec<RequestWarning> = Vec::new();
    let mut designers: Vec<Designer> = Vec::with_capacity(request.designers.len());

    for (index, input) in request.designers.iter().enumerate() {
        let name: &str = input.name.as_deref().map_or("", str::trim);
        if name.is_empty() {
            warnings.push(RequestWarning::BlankDesignerName { index });
            continue;
        }

        let Some(looks_count) = u32::try_from(input.looks_count)
            .ok()
            .filter(|count| *count > 0)
        else {
            warnings.push(RequestWarning::NonPositiveLooksCount {
                index,
                looks_count: input.looks_count,
            });
            continue;
        };

        designers.push(Designer::new(name, looks_count));
    }

    // Rule: at least one usable designer must remain
    if designers.is_empty() {
        return Err(ValidationError::EmptyDesignerList);
    }

    warnings.extend(duplicate_name_warnings(&designers));

    Ok(ValidatedRequest {
        event_id,
        designers,
        buffer_minutes,
        warnings,
    })
}

/// Reports every designer name that appears more than once, in first-seen order.
fn duplicate_name_warnings(designers: &[Designer]) -> Vec<RequestWarning> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for designer in designers {
        *counts.entry(designer.name.as_str()).or_insert(0) += 1;
    }

    let mut reported: Vec<&str> = Vec::new();
    designers
        .iter()
        .filter_map(|designer| {
            let occurrences: usize = counts.get(designer.name.as_str()).copied().unwrap_or(0);
            if occurrences > 1 && !reported.contains(&designer.name.as_str()) {
                reported.push(designer.name.as_str());
                Some(RequestWarning::DuplicateDesignerName {
                    name: designer.name.clone(),
                    occurrences,
                })
            } else {
                None
            }
        })
        .collect()
}
