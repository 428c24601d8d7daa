// docaudit-core/src/domain/validators/ai_log.rs

use super::ValidationContext;
use crate::domain::document::metadata::KEY_AI_GENERATED;
use crate::domain::document::{Document, to_posix};
use crate::domain::finding::{Check, Finding};

/// Documents declaring `ai_generated: true` must be traceable to a logged session.
pub fn check(doc: &Document, ctx: &ValidationContext<'_>) -> Option<Finding> {
    if !doc.metadata.flag(KEY_AI_GENERATED) {
        return None;
    }
    if ctx
        .activity
        .references(&doc.display_path, &to_posix(&doc.path))
    {
        return None;
    }
    Some(ctx.finding(
        doc,
        Check::AiLog,
        "ai_generated true but no ai-log entry found",
    ))
}
