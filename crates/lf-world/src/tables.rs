//! Template tables for institution generation.
//!
//! Bracketed words such as `[Founder]` are left for the writer to fill in.

/// Naming patterns for one era bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EraPatterns {
    /// Era bucket key, e.g. `1950-1980` or `any`.
    pub era: &'static str,
    /// Name templates.
    pub patterns: &'static [&'static str],
}

/// Naming patterns for one sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorNaming {
    /// Sector name.
    pub sector: &'static str,
    /// Patterns per era bucket, oldest first.
    pub eras: &'static [EraPatterns],
}

/// A list of entries keyed by sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorList {
    /// Sector name.
    pub sector: &'static str,
    /// Entries.
    pub items: &'static [&'static str],
}

/// Sector whose naming patterns stand in for unknown sectors.
pub const FALLBACK_SECTOR: &str = "technology";
/// Era bucket used by sectors whose names do not depend on era.
pub const ANY_ERA: &str = "any";

/// Naming patterns by sector and era.
pub const NAMING_PATTERNS: &[SectorNaming] = &[
    SectorNaming {
        sector: "banking",
        eras: &[
            EraPatterns {
                era: "pre-1900",
                patterns: &[
                    "[Founder] & Sons Bank",
                    "First National Bank of [Location]",
                    "[Location] Savings & Trust",
                    "Merchants Bank of [Location]",
                ],
            },
            EraPatterns {
                era: "1900-1950",
                patterns: &[
                    "[Location] National Bank",
                    "[Founder] Banking Corporation",
                    "Continental [Location] Bank",
                    "Union Trust Company",
                ],
            },
            EraPatterns {
                era: "1950-1980",
                patterns: &[
                    "[Abbreviation] Financial",
                    "[Location] Bancorp",
                    "First [Location]",
                    "[Abstract] Bank",
                ],
            },
            EraPatterns {
                era: "1980-2000",
                patterns: &[
                    "[Abstract] Financial Group",
                    "[Abbreviation] Holdings",
                    "[Location] Financial Partners",
                ],
            },
            EraPatterns {
                era: "2000-present",
                patterns: &["[Abstract]", "[Short-word] Bank", "[Abstract] Capital"],
            },
        ],
    },
    SectorNaming {
        sector: "technology",
        eras: &[
            EraPatterns {
                era: "pre-1970",
                patterns: &[
                    "[Founder] Computing Machines",
                    "Advanced [Function] Corporation",
                    "[Location] Electronics",
                    "Precision [Function] Inc.",
                ],
            },
            EraPatterns {
                era: "1970-1990",
                patterns: &[
                    "[Portmanteau]",
                    "[Abstract] Systems",
                    "[Abbreviation] Technologies",
                    "[Function]Corp",
                ],
            },
            EraPatterns {
                era: "1990-2010",
                patterns: &[
                    "[Abstract].com",
                    "[Misspelling]",
                    "[Short-word] Technologies",
                    "[Abstract] Solutions",
                ],
            },
            EraPatterns {
                era: "2010-present",
                patterns: &[
                    "[Single-word]",
                    "[Dropped-vowel]",
                    "[Abstract]",
                    "[Portmanteau]",
                ],
            },
        ],
    },
    SectorNaming {
        sector: "pharmaceutical",
        eras: &[
            EraPatterns {
                era: "pre-1950",
                patterns: &[
                    "[Founder] Pharmaceutical Company",
                    "[Location] Drug Company",
                    "[Founder] Chemical Works",
                ],
            },
            EraPatterns {
                era: "1950-1980",
                patterns: &[
                    "[Abstract]-Pharma",
                    "[Founder] Laboratories",
                    "[Abstract] Therapeutics",
                ],
            },
            EraPatterns {
                era: "1980-2000",
                patterns: &[
                    "[Abstract]Med",
                    "[Greek-prefix] Pharmaceuticals",
                    "[Abstract] Biosciences",
                ],
            },
            EraPatterns {
                era: "2000-present",
                patterns: &[
                    "[Greek-prefix]",
                    "[Abstract] Therapeutics",
                    "[Portmanteau]",
                ],
            },
        ],
    },
    SectorNaming {
        sector: "military",
        eras: &[EraPatterns {
            era: ANY_ERA,
            patterns: &[
                "[Ordinal] [Unit-type] Division",
                "[Location] [Unit-type] Regiment",
                "[Founder's] Own [Unit-type]",
                "[Abstract] [Unit-type] Brigade",
            ],
        }],
    },
    SectorNaming {
        sector: "religious",
        eras: &[EraPatterns {
            era: ANY_ERA,
            patterns: &[
                "Church of [Concept]",
                "Temple of [Deity/Concept]",
                "[Founder]-ite [Denomination]",
                "Order of [Saint/Founder]",
                "[Location] [Denomination] Assembly",
            ],
        }],
    },
    SectorNaming {
        sector: "criminal",
        eras: &[EraPatterns {
            era: ANY_ERA,
            patterns: &[
                "The [Abstract]",
                "[Location] [Crime-type]",
                "[Founder's] Organization",
                "The [Number]",
            ],
        }],
    },
];

/// Crisis types by sector.
pub const CRISIS_TYPES: &[SectorList] = &[
    SectorList {
        sector: "banking",
        items: &[
            "Market crash requiring government intervention",
            "Fraud scandal in leadership",
            "Hostile takeover attempt",
            "Regulatory investigation",
            "Technology disruption (new payment systems)",
            "Major debtor default",
            "Currency crisis in key market",
            "Merger integration problems",
        ],
    },
    SectorList {
        sector: "technology",
        items: &[
            "Product failure with safety implications",
            "Antitrust investigation",
            "Key talent exodus to competitor",
            "Patent infringement lawsuit",
            "Security breach exposing customer data",
            "Failed acquisition",
            "Platform obsolescence",
            "Founder departure/controversy",
        ],
    },
    SectorList {
        sector: "pharmaceutical",
        items: &[
            "Drug recall with fatalities",
            "Clinical trial fraud",
            "Patent cliff on major product",
            "FDA rejection of key drug",
            "Price gouging scandal",
            "Opioid lawsuit",
            "Manufacturing contamination",
            "Generic competition undercutting",
        ],
    },
    SectorList {
        sector: "military",
        items: &[
            "Defeat in major engagement",
            "Leadership scandal",
            "Budget cuts/reorganization",
            "Equipment failure",
            "War crimes investigation",
            "Mutiny or mass desertion",
            "Political change in government",
            "Merger with rival unit",
        ],
    },
    SectorList {
        sector: "religious",
        items: &[
            "Schism over doctrine",
            "Leadership succession crisis",
            "Abuse scandal",
            "Political persecution",
            "Theological challenge from reformers",
            "Financial scandal",
            "Competing revelation claims",
            "Generational faith crisis",
        ],
    },
    SectorList {
        sector: "criminal",
        items: &[
            "Major law enforcement crackdown",
            "Leadership assassination",
            "Territory war with rival",
            "Key member turning informant",
            "Money laundering exposure",
            "Supply chain disruption",
            "Generational succession conflict",
            "Legitimate business gone wrong",
        ],
    },
];

/// Crises for sectors without their own list.
pub const DEFAULT_CRISES: &[&str] = &[
    "Leadership transition crisis",
    "Financial difficulties",
    "Regulatory challenge",
    "Public relations scandal",
    "Competitive pressure",
    "Internal power struggle",
    "External threat or attack",
    "Mission drift or identity crisis",
];

/// Founding contexts by sector.
pub const FOUNDING_CONTEXTS: &[SectorList] = &[
    SectorList {
        sector: "banking",
        items: &[
            "Founded to finance [industry] development in [location]",
            "Created after [crisis] left [location] without reliable credit",
            "Spin-off from [larger-institution] regional operations",
            "Merger of [number] smaller banks seeking scale",
            "Founded by [immigrant-group] community for mutual support",
        ],
    },
    SectorList {
        sector: "technology",
        items: &[
            "Founded by [university] researchers commercializing [research]",
            "Garage startup by [founder-type] who saw opportunity in [trend]",
            "Spin-off from [larger-company] when project was deprioritized",
            "Founded to solve specific problem: [problem]",
            "Result of [government-program] privatization",
        ],
    },
    SectorList {
        sector: "pharmaceutical",
        items: &[
            "Founded by chemist who discovered [compound]",
            "Spin-off from [chemical-company] pharmaceutical division",
            "Founded to develop treatments for [disease]",
            "Result of [country] effort to develop domestic drug industry",
            "Started as [natural-remedy] company, transitioned to pharma",
        ],
    },
];

/// Founding contexts for sectors without their own list.
pub const DEFAULT_FOUNDING: &[&str] = &[
    "Founded in response to [need/opportunity]",
    "Created by [founder-type] who saw gap in market",
    "Emerged from [previous-institution] reorganization",
    "Founded during [historical-period] upheaval",
    "Result of [government/private] initiative",
];

/// Internal tensions.
pub const INTERNAL_TENSIONS: &[&str] = &[
    "Old guard vs. new leadership philosophy",
    "Profit/mission balance debates",
    "Centralization vs. regional autonomy",
    "Innovation vs. stability factions",
    "Generational culture clash",
    "Merger integration resentments",
    "Ethics vs. expedience disputes",
    "Founder's vision vs. market reality",
];

/// External relationships.
pub const EXTERNAL_RELATIONSHIPS: &[&str] = &[
    "Regulatory capture: close ties to [regulator]",
    "Dependent on [larger-entity] for [resource]",
    "Locked in competition with [rival]",
    "Symbiotic relationship with [partner]",
    "Strained relations with [government-entity]",
    "Mutual defense pact with [ally]",
    "Historical enemy: [antagonist]",
    "Patron relationship with [benefactor]",
];

/// Where an institution stands today.
pub const CURRENT_STATES: &[&str] = &[
    "Stable but facing disruption pressure",
    "Growing rapidly but culture is strained",
    "Mature and dominant but complacent",
    "Recovering from recent crisis",
    "Pivoting to new business model",
    "Acquisition target",
    "Acquirer seeking scale",
    "Facing existential regulatory threat",
];

/// Why a name changed.
pub const RENAME_REASONS: &[&str] = &[
    "simplified after regional expansion",
    "rebranded following merger",
    "modernized for new market positioning",
    "abbreviated for digital presence",
    "changed after scandal/crisis",
];

/// Every table the generator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstitutionTables {
    /// Naming patterns.
    pub naming: &'static [SectorNaming],
    /// Crisis types.
    pub crises: &'static [SectorList],
    /// Fallback crisis types.
    pub default_crises: &'static [&'static str],
    /// Founding contexts.
    pub founding: &'static [SectorList],
    /// Fallback founding contexts.
    pub default_founding: &'static [&'static str],
    /// Internal tensions.
    pub tensions: &'static [&'static str],
    /// External relationships.
    pub relationships: &'static [&'static str],
    /// Current states.
    pub current_states: &'static [&'static str],
    /// Rename reasons.
    pub rename_reasons: &'static [&'static str],
}

impl Default for InstitutionTables {
    fn default() -> Self {
        Self::BUILTIN
    }
}

impl InstitutionTables {
    /// The built-in tables.
    pub const BUILTIN: Self = Self {
        naming: NAMING_PATTERNS,
        crises: CRISIS_TYPES,
        default_crises: DEFAULT_CRISES,
        founding: FOUNDING_CONTEXTS,
        default_founding: DEFAULT_FOUNDING,
        tensions: INTERNAL_TENSIONS,
        relationships: EXTERNAL_RELATIONSHIPS,
        current_states: CURRENT_STATES,
        rename_reasons: RENAME_REASONS,
    };

    /// Sectors with naming patterns.
    pub fn sectors(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.naming.iter().map(|s| s.sector)
    }

    /// Naming patterns for `sector` in era `bucket`.
    ///
    /// Unknown sectors use the technology patterns. A missing bucket falls
    /// back to `any`, then to the sector's first bucket.
    pub fn naming_patterns(&self, sector: &str, bucket: &str) -> &'static [&'static str] {
        let naming = self
            .naming
            .iter()
            .find(|s| s.sector == sector)
            .or_else(|| self.naming.iter().find(|s| s.sector == FALLBACK_SECTOR));
        let Some(naming) = naming else {
            return &[];
        };
        naming
            .eras
            .iter()
            .find(|e| e.era == bucket)
            .or_else(|| naming.eras.iter().find(|e| e.era == ANY_ERA))
            .or_else(|| naming.eras.first())
            .map(|e| e.patterns)
            .unwrap_or_default()
    }

    /// Crisis types for `sector`.
    pub fn crises_for(&self, sector: &str) -> &'static [&'static str] {
        lookup(self.crises, sector).unwrap_or(self.default_crises)
    }

    /// Founding contexts for `sector`.
    pub fn founding_for(&self, sector: &str) -> &'static [&'static str] {
        lookup(self.founding, sector).unwrap_or(self.default_founding)
    }
}

fn lookup(lists: &'static [SectorList], sector: &str) -> Option<&'static [&'static str]> {
    lists.iter().find(|l| l.sector == sector).map(|l| l.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_bucket_lookup() {
        let t = InstitutionTables::BUILTIN;
        assert_eq!(t.naming_patterns("banking", "1950-1980")[0], "[Abbreviation] Financial");
        assert_eq!(t.naming_patterns("military", "1900-1950")[0], "[Ordinal] [Unit-type] Division");
        // No 1900-1950 bucket for technology: first bucket.
        assert_eq!(t.naming_patterns("technology", "1900-1950")[0], "[Founder] Computing Machines");
    }

    #[test]
    fn unknown_sector_uses_technology() {
        let t = InstitutionTables::BUILTIN;
        assert_eq!(
            t.naming_patterns("shipping", "1970-1990"),
            t.naming_patterns("technology", "1970-1990")
        );
        assert_eq!(t.crises_for("shipping"), DEFAULT_CRISES);
        assert_eq!(t.founding_for("military"), DEFAULT_FOUNDING);
        assert_eq!(t.crises_for("criminal")[0], "Major law enforcement crackdown");
    }

    #[test]
    fn sector_list() {
        let sectors: Vec<_> = InstitutionTables::default().sectors().collect();
        assert_eq!(
            sectors,
            ["banking", "technology", "pharmaceutical", "military", "religious", "criminal"]
        );
    }
}
