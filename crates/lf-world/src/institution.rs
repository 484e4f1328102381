//! Institution histories.
//!
//! A profile is assembled from the sector and era tables: a name template,
//! founding context, rename history, crises, current state, tensions, and
//! relationships. Every choice is a shuffle-then-take over [`Lcg`], so a
//! seed reproduces a profile exactly.

use serde::Serialize;

use lf_core::Lcg;

use crate::era::{DEFAULT_ERA, era_bucket, rename_steps, shift_era};
use crate::tables::{FALLBACK_SECTOR, InstitutionTables};

/// Crises in a profile when none is requested.
pub const DEFAULT_CRISES: usize = 2;
/// Tensions and relationships listed per profile.
pub const PAIRED_ENTRIES: usize = 2;
/// Years the ecosystem partner predates the primary institution.
pub const PARTNER_HEAD_START: i64 = 20;

/// A generated institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionProfile {
    /// Name or name template.
    pub name: String,
    /// Sector.
    pub sector: String,
    /// Founding era as given.
    pub founding_era: String,
    /// How it began.
    pub founding_context: String,
    /// Original name followed by renames.
    pub naming_evolution: Vec<String>,
    /// `Crisis N: ...` entries.
    pub crises: Vec<String>,
    /// Where it stands today.
    pub current_state: String,
    /// Internal tensions.
    pub internal_tensions: Vec<String>,
    /// External relationships.
    pub external_relationships: Vec<String>,
}

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstitutionRequest {
    /// A fixed name; otherwise one is drawn from the naming patterns.
    pub name: Option<String>,
    /// Sector.
    pub sector: String,
    /// Founding era, e.g. `1920s`.
    pub era: String,
    /// Number of crises.
    pub crises: usize,
}

impl Default for InstitutionRequest {
    fn default() -> Self {
        Self {
            name: None,
            sector: FALLBACK_SECTOR.to_string(),
            era: DEFAULT_ERA.to_string(),
            crises: DEFAULT_CRISES,
        }
    }
}

fn sample(rng: &mut Lcg, items: &[&str], count: usize) -> Vec<String> {
    rng.shuffle(items)
        .into_iter()
        .take(count)
        .map(str::to_string)
        .collect()
}

fn sample_one(rng: &mut Lcg, items: &[&str]) -> String {
    sample(rng, items, 1).into_iter().next().unwrap_or_default()
}

/// Generate one profile.
pub fn generate_institution(
    tables: &InstitutionTables,
    request: &InstitutionRequest,
    reference_year: i32,
    rng: &mut Lcg,
) -> InstitutionProfile {
    let sector = request.sector.as_str();
    let era = request.era.as_str();

    let name = match &request.name {
        Some(name) => name.clone(),
        None => sample_one(rng, tables.naming_patterns(sector, era_bucket(era))),
    };
    let founding_context = sample_one(rng, tables.founding_for(sector));

    let mut naming_evolution = vec![format!("{era}: \"{name}\" (original founding name)")];
    for _ in 0..rename_steps(era, reference_year) {
        let reason = sample_one(rng, tables.rename_reasons);
        naming_evolution.push(format!("[decade later]: Name {reason}"));
    }

    let crises = sample(rng, tables.crises_for(sector), request.crises)
        .into_iter()
        .enumerate()
        .map(|(i, c)| format!("Crisis {}: {c}", i + 1))
        .collect();
    let current_state = sample_one(rng, tables.current_states);
    let internal_tensions = sample(rng, tables.tensions, PAIRED_ENTRIES);
    let external_relationships = sample(rng, tables.relationships, PAIRED_ENTRIES);

    tracing::debug!(sector, era, %name, "institution generated");
    InstitutionProfile {
        name,
        sector: sector.to_string(),
        founding_era: era.to_string(),
        founding_context,
        naming_evolution,
        crises,
        current_state,
        internal_tensions,
        external_relationships,
    }
}

impl InstitutionProfile {
    /// Render as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut lines = vec![
            format!("# Institution Profile: {}", self.name),
            String::new(),
            format!("**Sector:** {}", self.sector),
            format!("**Founded:** {}", self.founding_era),
            String::new(),
            "## Founding Context".to_string(),
            String::new(),
            self.founding_context.clone(),
            String::new(),
        ];
        section(&mut lines, "Name Evolution", &self.naming_evolution);
        section(&mut lines, "Crisis History", &self.crises);
        lines.extend([
            "## Current State".to_string(),
            String::new(),
            self.current_state.clone(),
            String::new(),
        ]);
        section(&mut lines, "Internal Tensions", &self.internal_tensions);
        section(&mut lines, "External Relationships", &self.external_relationships);
        lines.extend(
            [
                "## Story Implications",
                "",
                "- This institution's history suggests [specific narrative possibilities]",
                "- Internal tensions could manifest as [character conflicts]",
                "- Past crises inform current behavior and trauma",
                "- External relationships create obligations and enemies",
            ]
            .map(str::to_string),
        );
        lines.join("\n")
    }
}

fn section(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    lines.push(format!("## {heading}"));
    lines.push(String::new());
    lines.extend(items.iter().map(|item| format!("- {item}")));
    lines.push(String::new());
}

/// A primary institution with a competitor and an older partner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ecosystem {
    /// The requested institution.
    pub primary: InstitutionProfile,
    /// Same sector and era, one crisis.
    pub competitor: InstitutionProfile,
    /// Founded earlier, one crisis.
    pub partner: InstitutionProfile,
}

/// Generate an ecosystem around `request`. Profiles are drawn in order:
/// primary, competitor, partner.
pub fn generate_ecosystem(
    tables: &InstitutionTables,
    request: &InstitutionRequest,
    reference_year: i32,
    rng: &mut Lcg,
) -> Ecosystem {
    let primary = generate_institution(tables, request, reference_year, rng);
    let competitor_request = InstitutionRequest {
        name: None,
        crises: 1,
        ..request.clone()
    };
    let competitor = generate_institution(tables, &competitor_request, reference_year, rng);
    let partner_request = InstitutionRequest {
        era: shift_era(&request.era, -PARTNER_HEAD_START),
        ..competitor_request
    };
    let partner = generate_institution(tables, &partner_request, reference_year, rng);
    Ecosystem {
        primary,
        competitor,
        partner,
    }
}

impl Ecosystem {
    /// The three profiles, primary first.
    pub fn profiles(&self) -> [&InstitutionProfile; 3] {
        [&self.primary, &self.competitor, &self.partner]
    }

    /// Render all three profiles under one heading.
    pub fn to_markdown(&self) -> String {
        let sector = &self.primary.sector;
        let mut title = sector.clone();
        if let Some(first) = title.get_mut(..1) {
            first.make_ascii_uppercase();
        }
        [
            format!("# {title} Sector Ecosystem"),
            String::new(),
            "## Primary Institution".to_string(),
            String::new(),
            self.primary.to_markdown(),
            String::new(),
            "---".to_string(),
            String::new(),
            "## Primary Competitor".to_string(),
            String::new(),
            self.competitor.to_markdown(),
            String::new(),
            "---".to_string(),
            String::new(),
            "## Partner/Supplier".to_string(),
            String::new(),
            self.partner.to_markdown(),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(sector: &str, era: &str) -> InstitutionRequest {
        InstitutionRequest {
            sector: sector.to_string(),
            era: era.to_string(),
            ..Default::default()
        }
    }

    fn generate(req: &InstitutionRequest, seed: u64) -> InstitutionProfile {
        generate_institution(&InstitutionTables::BUILTIN, req, 2026, &mut Lcg::new(seed))
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let req = request("banking", "1920s");
        assert_eq!(generate(&req, 42), generate(&req, 42));
    }

    #[test]
    fn profile_shape() {
        let p = generate(&request("banking", "1920s"), 7);
        let patterns = InstitutionTables::BUILTIN.naming_patterns("banking", "1900-1950");
        assert!(patterns.contains(&p.name.as_str()));
        assert_eq!(p.naming_evolution.len(), 4);
        assert_eq!(
            p.naming_evolution[0],
            format!("1920s: \"{}\" (original founding name)", p.name)
        );
        assert!(p.naming_evolution[1].starts_with("[decade later]: Name "));
        assert_eq!(p.crises.len(), DEFAULT_CRISES);
        assert!(p.crises[0].starts_with("Crisis 1: "));
        assert!(p.crises[1].starts_with("Crisis 2: "));
        assert_ne!(&p.crises[0][10..], &p.crises[1][10..]);
        assert_eq!(p.internal_tensions.len(), 2);
        assert_ne!(p.internal_tensions[0], p.internal_tensions[1]);
        assert_eq!(p.external_relationships.len(), 2);
    }

    #[test]
    fn fixed_name_and_crisis_cap() {
        let req = InstitutionRequest {
            name: Some("Umbrella Corporation".into()),
            crises: 20,
            ..request("pharmaceutical", "2015")
        };
        let p = generate(&req, 3);
        assert_eq!(p.name, "Umbrella Corporation");
        assert_eq!(p.crises.len(), 8);
        assert_eq!(p.naming_evolution.len(), 1);
    }

    #[test]
    fn ecosystem_partner_is_older() {
        let req = request("technology", "1980s");
        let eco = generate_ecosystem(&InstitutionTables::BUILTIN, &req, 2026, &mut Lcg::new(5));
        assert_eq!(eco.primary.founding_era, "1980s");
        assert_eq!(eco.competitor.founding_era, "1980s");
        assert_eq!(eco.partner.founding_era, "1960");
        assert_eq!(eco.competitor.crises.len(), 1);
        assert_eq!(eco.partner.crises.len(), 1);
        let md = eco.to_markdown();
        assert!(md.starts_with("# Technology Sector Ecosystem\n\n## Primary Institution\n"));
        assert!(md.contains("\n---\n\n## Partner/Supplier\n"));
    }

    #[test]
    fn markdown_layout() {
        let profile = InstitutionProfile {
            name: "Union Trust Company".into(),
            sector: "banking".into(),
            founding_era: "1920s".into(),
            founding_context: "Merger of [number] smaller banks seeking scale".into(),
            naming_evolution: vec![
                "1920s: \"Union Trust Company\" (original founding name)".into(),
                "[decade later]: Name rebranded following merger".into(),
            ],
            crises: vec!["Crisis 1: Regulatory investigation".into()],
            current_state: "Acquisition target".into(),
            internal_tensions: vec!["Generational culture clash".into()],
            external_relationships: vec!["Historical enemy: [antagonist]".into()],
        };
        insta::assert_snapshot!(profile.to_markdown(), @r#"
        # Institution Profile: Union Trust Company

        **Sector:** banking
        **Founded:** 1920s

        ## Founding Context

        Merger of [number] smaller banks seeking scale

        ## Name Evolution

        - 1920s: "Union Trust Company" (original founding name)
        - [decade later]: Name rebranded following merger

        ## Crisis History

        - Crisis 1: Regulatory investigation

        ## Current State

        Acquisition target

        ## Internal Tensions

        - Generational culture clash

        ## External Relationships

        - Historical enemy: [antagonist]

        ## Story Implications

        - This institution's history suggests [specific narrative possibilities]
        - Internal tensions could manifest as [character conflicts]
        - Past crises inform current behavior and trauma
        - External relationships create obligations and enemies
        "#);
    }

    #[test]
    fn json_is_camel_case() {
        let p = generate(&request("criminal", "1950"), 1);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["foundingEra"], "1950");
        assert!(json["namingEvolution"].is_array());
        assert!(json["externalRelationships"].is_array());
    }
}
