use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use thiserror::Error;
use tokio::sync::RwLock;

/// Template names the argument and judge operations look up.
pub const OPENING_TEMPLATE: &str = "opening_statement";
pub const STRATEGIC_TEMPLATE: &str = "strategic_debate";
pub const JUDGE_TEMPLATE: &str = "judge_round";

/// Default template bodies. Replace `{topic}`, `{position}`, `{round_num}`,
/// `{context}`, `{pro_arg}`, `{con_arg}` before sending.
const STRATEGIC_DEBATE_BODY: &str = r#"You are debating the {position} position on: "{topic}"

This is Round {round_num}. Previous arguments:
{context}

CRITICAL RULES:
1. Keep it BRIEF: 100-150 words MAX (about 2-3 short paragraphs)
2. Each round must be STRONGER than the previous - escalate intensity
3. Use 1-2 POWERFUL, SPECIFIC pieces of evidence (real statistics, studies, or examples)
4. Be PUNCHY and IMPACTFUL - every sentence must hit hard
5. Round 1: Establish position with strong facts
6. Round 2+: DIRECTLY attack opponent's weaknesses + add new devastating evidence
7. Later rounds: Go for the knockout - use your strongest, most irrefutable points

Format: Lead with your strongest point. Back it with concrete evidence. End with impact.

{position} position, Round {round_num} - make it count!"#;

const OPENING_STATEMENT_BODY: &str = r#"Opening statement for {position} on: "{topic}"

RULES:
1. 100-150 words MAX (2-3 short paragraphs)
2. Start with your STRONGEST point immediately
3. Use 2-3 specific, concrete pieces of evidence (real data/statistics)
4. Make every sentence powerful and direct
5. No fluff - only impact

Format:
- Opening punch (your strongest claim with evidence)
- Supporting strike (1-2 more concrete facts)
- Closing impact (why this matters)

Be brief, brutal, and backed by data."#;

const JUDGE_ROUND_BODY: &str = r#"Evaluate these arguments on: "{topic}"

PRO: {pro_arg}

CON: {con_arg}

Rate 1-10 based on:
- Brevity and impact (shorter + more powerful = higher score)
- Specific evidence quality (real data, not vague claims)
- Direct engagement with opponent's points
- Strategic strength for this round number

Format:
PRO: X/10
CON: X/10
Winner: [PRO/CON/TIE]
Reason: [One sentence explaining why - be specific about what made the winner stronger]"#;

fn default_templates() -> HashMap<String, String> {
    HashMap::from([
        (STRATEGIC_TEMPLATE.to_string(), STRATEGIC_DEBATE_BODY.to_string()),
        (OPENING_TEMPLATE.to_string(), OPENING_STATEMENT_BODY.to_string()),
        (JUDGE_TEMPLATE.to_string(), JUDGE_ROUND_BODY.to_string()),
    ])
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template references unbound placeholder '{{{0}}}'")]
    UnboundPlaceholder(String),
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern"));

/// Substitutes `{name}` tokens in `template` from `vars`. A token with no
/// binding fails the whole render; extra bindings are ignored.
pub fn render(template: &str, vars: &[(&str, &str)]) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(template) {
        let token = caps.get(0).expect("match has a full capture");
        let name = &caps[1];
        let value = vars
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| RenderError::UnboundPlaceholder(name.to_string()))?;
        out.push_str(&template[last..token.start()]);
        out.push_str(value);
        last = token.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}

/// Shared name -> template mapping behind a lock, seeded with the default
/// set at startup. Handles are cheap to clone; mutations are last-write-wins
/// and nothing is persisted across restarts.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl TemplateStore {
    pub fn with_defaults() -> Self {
        Self {
            inner: Arc::new(RwLock::new(default_templates())),
        }
    }

    pub fn empty() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, name: &str) -> Option<String> {
        self.inner.read().await.get(name).cloned()
    }

    /// Snapshot of the full mapping.
    pub async fn all(&self) -> HashMap<String, String> {
        self.inner.read().await.clone()
    }

    /// Inserts or overwrites the entry for `name`.
    pub async fn insert(&self, name: String, template: String) {
        self.inner.write().await.insert(name, template);
    }

    /// Removes `name`, reporting whether it existed.
    pub async fn remove(&self, name: &str) -> bool {
        self.inner.write().await.remove(name).is_some()
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
