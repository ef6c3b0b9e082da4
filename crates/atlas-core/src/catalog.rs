//! Unit catalogs
//!
//! The generator only needs a list of units. This module supplies the
//! curated defaults and reads user catalogs from JSON or YAML:
//!
//! ```yaml
//! units:
//!   - title: Basic Step In Place
//!     kind: two
//!     steps: [in_place, in_place, in_place]
//!     tags: [beginner, basic]
//! partners:
//!   - title: Basic Partner
//!     lead: Basic Step In Place
//!     follow: Basic Step In Place
//!     tags: [beginner]
//! ```
//!
//! Partner entries name solo units by title. Every unit is validated when
//! the catalog is built; one bad entry fails the whole load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sequence::{PartnerSequence, SoloSequence};
use crate::state::{Figure, PartnerStepUnit};
use crate::step::{Direction, Foot, Rotation, Step};
use crate::unit::{StepUnit, UnitDef};
use crate::{Error, Result};

/// Difficulty, read from an entry's tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Unknown,
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Highest level named in `tags`
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        let has = |name: &str| tags.iter().any(|t| t.as_ref().eq_ignore_ascii_case(name));
        if has("advanced") {
            Self::Advanced
        } else if has("intermediate") {
            Self::Intermediate
        } else if has("beginner") {
            Self::Beginner
        } else {
            Self::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// A figure with its tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub figure: Figure,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogEntry {
    pub fn new(figure: impl Into<Figure>, tags: &[&str]) -> Self {
        Self {
            figure: figure.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn label(&self) -> String {
        self.figure.label()
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_tags(&self.tags)
    }
}

/// A solo unit as written in a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UnitEntryDef {
    #[serde(flatten)]
    unit: UnitDef,
    #[serde(default)]
    tags: Vec<String>,
}

/// A partner pair as written in a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PartnerEntryDef {
    #[serde(default)]
    title: Option<String>,
    lead: String,
    follow: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// On-disk catalog layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    units: Vec<UnitEntryDef>,
    #[serde(default)]
    partners: Vec<PartnerEntryDef>,
}

/// Ordered list of figures available to the generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Curated units plus the partner pairs used by the curated partner sequences
    pub fn builtin() -> Self {
        let mut entries = default_step_units();
        for pair in common_partner_sequences()
            .into_iter()
            .flat_map(|seq| seq.beats)
        {
            let figure = Figure::Partner(pair);
            if !entries.iter().any(|e| e.figure == figure) {
                entries.push(CatalogEntry {
                    figure,
                    tags: vec!["beginner".to_string(), "partner".to_string()],
                });
            }
        }
        Self { entries }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::from_file(file)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::from_file(file)
    }

    /// Load a catalog file, choosing the format by extension (`.json`, `.yaml`, `.yml`)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content)?,
            Some("yaml") | Some("yml") => Self::from_yaml(&content)?,
            other => {
                return Err(Error::Catalog(format!(
                    "unsupported catalog format: {}",
                    other.unwrap_or("<none>")
                )))
            }
        };

        tracing::info!(
            path = %path.display(),
            entries = catalog.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    fn from_file(file: CatalogFile) -> Result<Self> {
        let mut entries = Vec::with_capacity(file.units.len() + file.partners.len());

        for def in file.units {
            let unit = StepUnit::try_from(def.unit)?;
            entries.push(CatalogEntry {
                figure: Figure::Solo(unit),
                tags: def.tags,
            });
        }

        for def in file.partners {
            let lead = find_solo(&entries, &def.lead)?;
            let follow = find_solo(&entries, &def.follow)?;
            let mut pair = PartnerStepUnit::new(lead, follow);
            pair.title = def.title;
            entries.push(CatalogEntry {
                figure: Figure::Partner(pair),
                tags: def.tags,
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Solo units, for foot-based generation
    pub fn units(&self) -> Vec<StepUnit> {
        self.entries
            .iter()
            .filter_map(|e| match &e.figure {
                Figure::Solo(unit) => Some(unit.clone()),
                Figure::Partner(_) => None,
            })
            .collect()
    }

    /// Every figure, for state-based generation
    pub fn figures(&self) -> Vec<Figure> {
        self.entries.iter().map(|e| e.figure.clone()).collect()
    }

    /// First entry whose label matches, ignoring case
    pub fn find(&self, label: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.label().eq_ignore_ascii_case(label))
    }
}

fn find_solo(entries: &[CatalogEntry], title: &str) -> Result<StepUnit> {
    entries
        .iter()
        .find_map(|e| match &e.figure {
            Figure::Solo(unit) if unit.label() == title => Some(unit.clone()),
            _ => None,
        })
        .ok_or_else(|| Error::Catalog(format!("partner entry names unknown unit: {}", title)))
}

/// One atomic step per direction
pub fn default_steps() -> Vec<Step> {
    Direction::ALL.iter().copied().map(Step::from).collect()
}

pub fn basic_step_in_place() -> StepUnit {
    StepUnit::two(Step::IN_PLACE, Some(Step::IN_PLACE), Step::IN_PLACE)
        .with_title("Basic Step In Place")
}

pub fn linear_basic_forward_half() -> StepUnit {
    StepUnit::two(Step::FORWARD, Some(Step::FORWARD), Step::BACKWARD)
        .with_dominant_starting_foot(Foot::Right)
        .with_title("Linear Basic Forward Half")
}

pub fn linear_basic_backward_half() -> StepUnit {
    StepUnit::two(Step::BACKWARD, Some(Step::BACKWARD), Step::FORWARD)
        .with_dominant_starting_foot(Foot::Left)
        .with_title("Linear Basic Backward Half")
}

pub fn lateral_step() -> StepUnit {
    StepUnit::two(Step::FORWARD, Some(Step::FORWARD), Step::FORWARD)
        .with_rotation(Rotation::Half)
        .with_title("Lateral Step")
}

pub fn reverse_lateral() -> StepUnit {
    StepUnit::two(Step::BACKWARD, Some(Step::BACKWARD), Step::BACKWARD)
        .with_rotation(Rotation::Half)
        .with_title("Reverse Lateral")
}

/// Curated units: a single step per direction, then the named figures
pub fn default_step_units() -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = default_steps()
        .into_iter()
        .map(|step| CatalogEntry::new(StepUnit::one(step), &["beginner", "single"]))
        .collect();

    entries.extend([
        CatalogEntry::new(basic_step_in_place(), &["beginner", "basic"]),
        CatalogEntry::new(linear_basic_forward_half(), &["beginner", "linear"]),
        CatalogEntry::new(linear_basic_backward_half(), &["beginner", "linear"]),
        CatalogEntry::new(lateral_step(), &["intermediate", "turn"]),
        CatalogEntry::new(reverse_lateral(), &["intermediate", "turn"]),
    ]);
    entries
}

/// Curated solo sequences. None of them carry an id.
pub fn common_solo_sequences() -> Vec<SoloSequence> {
    vec![
        SoloSequence::titled("Basic Step In Place", vec![basic_step_in_place()]),
        SoloSequence::titled("Linear Basic Forward Half", vec![linear_basic_forward_half()]),
        SoloSequence::titled("Linear Basic Backward Half", vec![linear_basic_backward_half()]),
        SoloSequence::titled("Lateral Step", vec![lateral_step()]),
        SoloSequence::titled("Reverse Lateral", vec![reverse_lateral()]),
    ]
}

/// Distinct units used by the curated solo sequences, first-seen order
pub fn common_step_units() -> Vec<StepUnit> {
    let mut units: Vec<StepUnit> = Vec::new();
    for unit in common_solo_sequences().into_iter().flat_map(|s| s.units) {
        if !units.contains(&unit) {
            units.push(unit);
        }
    }
    units
}

/// Curated partner sequences
pub fn common_partner_sequences() -> Vec<PartnerSequence> {
    let basic = basic_step_in_place();
    let forward = linear_basic_forward_half();
    let backward = linear_basic_backward_half();

    vec![
        PartnerSequence::new(vec![PartnerStepUnit::new(basic.clone(), basic)])
            .with_title("Basic Partner Pattern"),
        // Lead goes back while follow comes forward, then they swap
        PartnerSequence::new(vec![
            PartnerStepUnit::new(backward.clone(), forward.clone()),
            PartnerStepUnit::new(forward, backward),
        ])
        .with_title("Linear Basic Partner Pattern"),
    ]
}
