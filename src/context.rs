//! Prompt context assembly from aggregated source groups.

use crate::sources::SourceGroups;

/// Separator line between source blocks in the assembled context.
pub const GROUP_SEPARATOR: &str = "\n---\n";

/// Render aggregated groups into a single context string for the prompt.
///
/// Each group emits its primary URL followed by the concatenated contents
/// of its passages; blocks are joined with [`GROUP_SEPARATOR`] in
/// aggregator-preserved order. The zero-group case is handled by the
/// orchestrator, which substitutes the no-documents notice instead of
/// calling this function.
pub fn assemble(groups: &SourceGroups) -> String {
    groups
        .iter()
        .map(|group| {
            let contents: Vec<&str> = group
                .passages
                .iter()
                .map(|p| p.content.as_str())
                .collect();
            format!(
                "Source: {}\nContent:\n{}\n",
                group.primary_url,
                contents.join("\n")
            )
        })
        .collect::<Vec<_>>()
        .join(GROUP_SEPARATOR)
}
