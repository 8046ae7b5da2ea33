//! Fuzzy reconciliation of external design variables against a project's
//! own token catalog.
//!
//! Matching is best-effort annotation data: a variable with no acceptable
//! candidate yields `matched: None`, never an error. Candidate selection
//! is deterministic — the highest confidence wins and equal confidences
//! break lexicographically by project token name.

use serde::{Deserialize, Serialize};

use weft_core::{Color, MAX_RGB_DISTANCE};

use crate::model::TokenValue;

/// Name-similarity acceptance bound.
const NAME_THRESHOLD: f64 = 0.7;
/// Color value-similarity acceptance bound.
const COLOR_THRESHOLD: f64 = 0.95;
/// Numeric value-similarity acceptance bound.
const NUMBER_THRESHOLD: f64 = 0.99;

/// An externally supplied design variable to reconcile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalVariable {
    pub id: String,
    pub name: String,
    /// Resolved type tag as exported (`COLOR`, `FLOAT`, ...).
    pub resolved_type: String,
    pub value: TokenValue,
}

/// One entry of the project's token catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectToken {
    pub name: String,
    /// Literal value text (`#3366ff`, `16px`, ...).
    pub value: String,
    /// Project-side type tag (`color`, `spacing`, ...).
    pub token_type: String,
    /// CSS custom-property name the project publishes, if any.
    pub style_variable_name: Option<String>,
}

/// The project token a variable reconciled onto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedToken {
    pub name: String,
    pub value: String,
    pub token_type: String,
    pub style_variable_name: Option<String>,
}

/// Reconciliation result for one external variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMatch {
    pub variable_id: String,
    pub variable_name: String,
    pub matched: Option<MatchedToken>,
    pub confidence: f64,
}

/// Match every external variable against the project catalog.
pub fn match_tokens(external: &[ExternalVariable], project: &[ProjectToken]) -> Vec<TokenMatch> {
    external
        .iter()
        .map(|variable| match_one(variable, project))
        .collect()
}

fn match_one(variable: &ExternalVariable, project: &[ProjectToken]) -> TokenMatch {
    let mut best: Option<(f64, &ProjectToken)> = None;

    for token in project {
        if !types_compatible(&variable.resolved_type, &token.token_type) {
            continue;
        }
        let Some(confidence) = candidate_confidence(variable, token) else {
            continue;
        };

        let replace = match best {
            None => true,
            Some((best_confidence, best_token)) => {
                confidence > best_confidence
                    || (confidence == best_confidence && token.name < best_token.name)
            }
        };
        if replace {
            best = Some((confidence, token));
        }
    }

    match best {
        Some((confidence, token)) => TokenMatch {
            variable_id: variable.id.clone(),
            variable_name: variable.name.clone(),
            matched: Some(MatchedToken {
                name: token.name.clone(),
                value: token.value.clone(),
                token_type: token.token_type.clone(),
                style_variable_name: token.style_variable_name.clone(),
            }),
            confidence,
        },
        None => TokenMatch {
            variable_id: variable.id.clone(),
            variable_name: variable.name.clone(),
            matched: None,
            confidence: 0.0,
        },
    }
}

/// Type compatibility gate; unknown tags on either side bypass it.
fn types_compatible(external: &str, project: &str) -> bool {
    let project = project.to_lowercase();
    match external.to_ascii_uppercase().as_str() {
        "COLOR" => match project.as_str() {
            "color" => true,
            "spacing" | "sizing" | "radius" | "typography" | "shadow" | "opacity" => false,
            _ => true,
        },
        "FLOAT" => match project.as_str() {
            "spacing" | "sizing" | "radius" => true,
            "color" | "typography" | "shadow" => false,
            _ => true,
        },
        _ => true,
    }
}

fn candidate_confidence(variable: &ExternalVariable, token: &ProjectToken) -> Option<f64> {
    let name_score = name_similarity(&variable.name, &token.name);

    // Exact normalized equality is a certain match.
    if normalize(&variable.name) == normalize(&token.name) {
        return Some(1.0);
    }

    let mut confidence: Option<f64> = None;
    if name_score > NAME_THRESHOLD {
        confidence = Some(name_score);
    }

    if let Some(value_confidence) = value_confidence(variable, token, name_score) {
        confidence = Some(match confidence {
            Some(existing) => existing.max(value_confidence),
            None => value_confidence,
        });
    }

    confidence
}

fn value_confidence(
    variable: &ExternalVariable,
    token: &ProjectToken,
    name_score: f64,
) -> Option<f64> {
    match &variable.value {
        TokenValue::Color(color) => {
            let other = parse_color(&token.value)?;
            let similarity = 1.0 - color.rgb_distance(&other) / MAX_RGB_DISTANCE;
            if similarity > COLOR_THRESHOLD {
                Some((0.3 * name_score + 0.7 * similarity).max(0.9 * similarity))
            } else {
                None
            }
        }
        TokenValue::Number(number) => {
            let other = parse_numeric(&token.value)?;
            let similarity = numeric_similarity(*number, other);
            if similarity > NUMBER_THRESHOLD {
                Some((0.4 * name_score + 0.6 * similarity).max(0.95 * similarity))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn numeric_similarity(a: f64, b: f64) -> f64 {
    if a == b {
        return 1.0;
    }
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        return 1.0;
    }
    (1.0 - (a - b).abs() / scale).max(0.0)
}

fn parse_color(value: &str) -> Option<Color> {
    Color::from_hex(value.trim())
}

fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        return Some(n);
    }
    for suffix in ["px", "rem", "em", "%"] {
        if let Some(stripped) = trimmed.strip_suffix(suffix) {
            return stripped.trim().parse::<f64>().ok();
        }
    }
    None
}

/// Weighted name similarity over three signals.
fn name_similarity(a: &str, b: &str) -> f64 {
    let norm_a = normalize(a);
    let norm_b = normalize(b);
    if norm_a.is_empty() || norm_b.is_empty() {
        return 0.0;
    }

    0.5 * edit_similarity(&norm_a, &norm_b)
        + 0.3 * containment_ratio(&norm_a, &norm_b)
        + 0.2 * shared_part_ratio(a, b)
}

/// Lowercase with separator characters removed.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | '/' | '.' | ' '))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn edit_similarity(a: &str, b: &str) -> f64 {
    let distance = levenshtein(a, b) as f64;
    let longest = a.chars().count().max(b.chars().count()) as f64;
    if longest == 0.0 {
        1.0
    } else {
        1.0 - distance / longest
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

fn containment_ratio(a: &str, b: &str) -> f64 {
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if longer.contains(shorter) {
        shorter.chars().count() as f64 / longer.chars().count() as f64
    } else {
        0.0
    }
}

/// Ratio of shared separator-delimited parts.
fn shared_part_ratio(a: &str, b: &str) -> f64 {
    let parts_a = split_parts(a);
    let parts_b = split_parts(b);
    if parts_a.is_empty() || parts_b.is_empty() {
        return 0.0;
    }
    let shared = parts_a.iter().filter(|p| parts_b.contains(p)).count() as f64;
    shared / parts_a.len().max(parts_b.len()) as f64
}

fn split_parts(name: &str) -> Vec<String> {
    let mut parts: Vec<String> = name
        .to_lowercase()
        .split(['-', '_', '/', '.', ' '])
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    parts.dedup();
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_variable(name: &str, hex: &str) -> ExternalVariable {
        ExternalVariable {
            id: format!("V:{}", name),
            name: name.into(),
            resolved_type: "COLOR".into(),
            value: TokenValue::Color(Color::from_hex(hex).unwrap()),
        }
    }

    fn color_token(name: &str, hex: &str) -> ProjectToken {
        ProjectToken {
            name: name.into(),
            value: hex.into(),
            token_type: "color".into(),
            style_variable_name: None,
        }
    }

    #[test]
    fn test_exact_name_and_value_match() {
        let external = [color_variable("color/primary/500", "#3366FF")];
        let project = [color_token("Color Primary 500", "#3366FF")];

        let matches = match_tokens(&external, &project);
        assert_eq!(matches.len(), 1);
        let result = &matches[0];
        assert!(result.matched.is_some());
        assert!(result.confidence >= 0.95, "confidence {}", result.confidence);
    }

    #[test]
    fn test_color_similarity_below_threshold_rejects() {
        // Distance 27.7 of a possible 441.7 puts similarity near 0.937,
        // below the 0.95 acceptance bound.
        let external = [color_variable("alpha", "#000000")];
        let project = [color_token("omega", "#101010")];

        let matches = match_tokens(&external, &project);
        assert!(matches[0].matched.is_none());
        assert_eq!(matches[0].confidence, 0.0);
    }

    #[test]
    fn test_color_similarity_above_threshold_accepts() {
        // Distance 17.3 puts similarity near 0.961, above the bound.
        let external = [color_variable("alpha", "#000000")];
        let project = [color_token("omega", "#0a0a0a")];

        let matches = match_tokens(&external, &project);
        assert!(matches[0].matched.is_some());
        assert!(matches[0].confidence > 0.8);
    }

    #[test]
    fn test_type_gating() {
        let external = [ExternalVariable {
            id: "V:1".into(),
            name: "spacing/md".into(),
            resolved_type: "FLOAT".into(),
            value: TokenValue::Number(16.0),
        }];
        let project = [
            color_token("spacing-md", "#111111"),
            ProjectToken {
                name: "space-md".into(),
                value: "16px".into(),
                token_type: "spacing".into(),
                style_variable_name: Some("--space-md".into()),
            },
        ];

        let matches = match_tokens(&external, &project);
        let matched = matches[0].matched.as_ref().unwrap();
        assert_eq!(matched.name, "space-md");
        assert_eq!(matched.style_variable_name.as_deref(), Some("--space-md"));
    }

    #[test]
    fn test_numeric_near_exact_bound() {
        let external = [ExternalVariable {
            id: "V:1".into(),
            name: "x".into(),
            resolved_type: "FLOAT".into(),
            value: TokenValue::Number(16.0),
        }];

        // 15.0 vs 16.0 is a 6% relative difference: rejected.
        let far = [ProjectToken {
            name: "y".into(),
            value: "15".into(),
            token_type: "spacing".into(),
            style_variable_name: None,
        }];
        assert!(match_tokens(&external, &far)[0].matched.is_none());

        let exact = [ProjectToken {
            name: "y".into(),
            value: "16px".into(),
            token_type: "spacing".into(),
            style_variable_name: None,
        }];
        let matches = match_tokens(&external, &exact);
        assert!(matches[0].matched.is_some());
        assert!(matches[0].confidence >= 0.95);
    }

    #[test]
    fn test_tie_breaks_lexicographically() {
        let external = [color_variable("brand", "#123456")];
        // Both candidates carry the identical value, hence identical
        // confidence; the lexicographically smaller name must win.
        let project = [
            color_token("zeta", "#123456"),
            color_token("beta", "#123456"),
        ];

        let matches = match_tokens(&external, &project);
        assert_eq!(matches[0].matched.as_ref().unwrap().name, "beta");
    }

    #[test]
    fn test_no_candidates_yields_none() {
        let external = [color_variable("color/primary", "#3366ff")];
        let matches = match_tokens(&external, &[]);
        assert!(matches[0].matched.is_none());
        assert_eq!(matches[0].confidence, 0.0);
    }

    #[test]
    fn test_name_similarity_accepts_close_names() {
        let score = name_similarity("color/primary/500", "color-primary-500");
        assert!(score > 0.9, "score {}", score);
    }
}
