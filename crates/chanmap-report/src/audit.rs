use chanmap_model::Resolution;

/// Comment lines written above the aligned export.
///
/// Every line starts with `#`. Kept matches are listed in export order,
/// then any matches skipped for a duplicate target.
pub fn render_audit_lines(
    resolution: &Resolution,
    source_rows: usize,
    target_rows: usize,
) -> Vec<String> {
    let mut lines = vec![
        format!(
            "# High Confidence Variable Matches (Confidence >= {})",
            resolution.threshold
        ),
        format!("# Unique Matches Exported: {}", resolution.kept.len()),
        format!("# Duplicate Matches Skipped: {}", resolution.skipped.len()),
        format!("# Source Data Rows: {source_rows}"),
        format!("# Target Data Rows: {target_rows}"),
        "#".to_string(),
        "# Format: Row 1 = source channel names, Row 2 = target channel names, Rows 3+ = Data"
            .to_string(),
        "# Note: When multiple source channels matched the same target channel,".to_string(),
        "# only the first (highest confidence) source channel was exported.".to_string(),
        "#".to_string(),
        "# Exported Match Details:".to_string(),
    ];
    for m in &resolution.kept {
        lines.push(format!(
            "# {} → {} (Conf: {:.2}, Type: {})",
            m.source_name, m.target_name, m.confidence, m.match_type
        ));
    }
    if !resolution.skipped.is_empty() {
        lines.push("#".to_string());
        lines.push("# Skipped Matches (Duplicate Target Outputs):".to_string());
        for skipped in &resolution.skipped {
            lines.push(format!(
                "# SKIPPED: {} → {} (Conf: {:.2})",
                skipped.matched.source_name, skipped.matched.target_name, skipped.matched.confidence
            ));
        }
    }
    lines.push("#".to_string());
    lines
}
