use clap::Args;
use serde::Serialize;

use authfix::rewrite::guard::GUARD_OPENER_MARKER;
use authfix::rewrite::rules::SUBSTITUTION_RULES;

use super::CmdResult;

#[derive(Args)]
pub struct RulesArgs {}

#[derive(Serialize)]
pub struct RulesOutput {
    rules: Vec<RuleInfo>,
    total: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RuleInfo {
    name: String,
    kind: String,
    pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    replacement: Option<String>,
}

pub fn run_json(_args: RulesArgs) -> CmdResult<RulesOutput> {
    let mut rules: Vec<RuleInfo> = SUBSTITUTION_RULES
        .iter()
        .map(|rule| RuleInfo {
            name: rule.name.to_string(),
            kind: "substitution".to_string(),
            pattern: rule.pattern.to_string(),
            replacement: Some(rule.replacement.to_string()),
        })
        .collect();

    // The structural pass is not a pattern rewrite; it triggers on the
    // guard-opener marker and tracks brace depth from there.
    rules.push(RuleInfo {
        name: "guard-block".to_string(),
        kind: "structural".to_string(),
        pattern: GUARD_OPENER_MARKER.to_string(),
        replacement: None,
    });

    let total = rules.len();
    Ok((RulesOutput { rules, total }, 0))
}
