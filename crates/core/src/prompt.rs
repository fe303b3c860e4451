// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use runway_domain::{ValidatedRequest, WallClockTime, schema};
use serde::Serialize;
use serde_json::Value;

/// Name of the tool the collaborator is asked to call with its schedule.
pub const SCHEDULE_TOOL_NAME: &str = "create_runway_schedule";

const TOOL_DESCRIPTION: &str =
    "Return a complete runway schedule with designer slots, transitions and backstage calls";

const SYSTEM_PROMPT: &str = "You are an expert fashion show producer who builds minute-accurate \
runway timelines. Every designer walks exactly once per listed entry, slots never overlap, \
changeovers respect the buffer, and models are called backstage well before they walk. \
Times are 24-hour HH:MM on a single day. Respond only by calling the provided tool.";

/// Event metadata that shapes the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    /// The event title.
    pub title: String,
    /// When the show starts, if known.
    pub start_time: Option<WallClockTime>,
    /// Where the show takes place, if known.
    pub venue: Option<String>,
}

impl EventContext {
    /// Creates a new `EventContext`.
    #[must_use]
    pub fn new(title: &str, start_time: Option<WallClockTime>, venue: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            start_time,
            venue: venue.map(str::to_string),
        }
    }
}

/// Everything the generation collaborator receives for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptPayload {
    /// Standing instructions.
    pub system_prompt: String,
    /// The request-specific instructions.
    pub user_prompt: String,
    /// Tool the collaborator must call.
    pub tool_name: String,
    /// Human-readable tool description.
    pub tool_description: String,
    /// JSON Schema for the tool arguments.
    pub output_schema: Value,
}

/// Builds the prompt for a validated request.
///
/// Pure and deterministic: the same inputs always produce the same payload.
/// The schema comes from `runway_domain::schema`, which the normalizer reads
/// with the same field names.
///
/// # Arguments
///
/// * `request` - The validated request
/// * `context` - Metadata for the event being scheduled
/// * `min_backstage_lead_minutes` - Minimum lead the normalizer will enforce
#[must_use]
pub fn build_prompt(
    request: &ValidatedRequest,
    context: &EventContext,
    min_backstage_lead_minutes: u32,
) -> PromptPayload {
    let names: Vec<&str> = request
        .designers
        .iter()
        .map(|designer| designer.name.as_str())
        .collect();

    PromptPayload {
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_prompt: user_prompt(request, context, min_backstage_lead_minutes),
        tool_name: SCHEDULE_TOOL_NAME.to_string(),
        tool_description: TOOL_DESCRIPTION.to_string(),
        output_schema: schema::output_schema(&names, request.buffer_minutes),
    }
}

fn user_prompt(
    request: &ValidatedRequest,
    context: &EventContext,
    min_backstage_lead_minutes: u32,
) -> String {
    let buffer: u32 = request.buffer_minutes;
    let mut lines: Vec<String> = vec![format!(
        "Create a runway schedule for \"{}\".",
        context.title
    )];

    lines.push(context.start_time.map_or_else(
        || String::from("Choose a sensible evening start time."),
        |start| format!("The show starts at {start}."),
    ));
    if let Some(venue) = &context.venue {
        lines.push(format!("Venue: {venue}."));
    }

    lines.push(String::new());
    lines.push(format!(
        "Designers ({} entries, {} looks in total):",
        request.designers.len(),
        request.total_looks()
    ));
    lines.extend(
        request
            .designers
            .iter()
            .enumerate()
            .map(|(position, designer)| {
                format!(
                    "{}. {} - {} looks",
                    position + 1,
                    designer.name,
                    designer.looks_count
                )
            }),
    );

    lines.push(String::new());
    lines.push(String::from("Rules:"));
    lines.push(String::from(
        "- Give every designer entry exactly one slot with its listed looks count.",
    ));
    lines.push(format!(
        "- Leave at least {buffer} minutes between the end of one slot and the start of the next."
    ));
    lines.push(format!(
        "- List one transition between each pair of consecutive slots, in show order, lasting at least {buffer} minutes and no longer than the gap."
    ));
    lines.push(format!(
        "- Set each backstage time at least {min_backstage_lead_minutes} minutes before the slot starts."
    ));
    lines.push(String::from(
        "- Add one backstage call per designer entry, strictly before that designer's slot.",
    ));
    lines.push(String::from(
        "- Use designer names exactly as listed and 24-hour HH:MM times.",
    ));

    lines.join("\n")
}
