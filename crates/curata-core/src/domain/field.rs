//! Research field catalog
//!
//! Static reference data used for classifying papers and widening search
//! queries. The catalog is not user-editable.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// A topical research category from the fixed catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ResearchField {
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
}

impl ResearchField {
    fn make(name: &str, description: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// The predefined field catalog, in classification priority order.
    pub fn predefined() -> &'static [ResearchField] {
        &PREDEFINED_FIELDS
    }

    /// Catalog fallback when classification finds no match.
    pub fn default_field() -> &'static ResearchField {
        PREDEFINED_FIELDS
            .iter()
            .find(|f| f.name == "Computer Science")
            .expect("catalog contains Computer Science")
    }
}

lazy_static! {
    static ref PREDEFINED_FIELDS: Vec<ResearchField> = vec![
        ResearchField::make(
            "Artificial Intelligence",
            "Machine learning, deep learning, neural networks, and AI applications",
            &[
                "AI",
                "machine learning",
                "deep learning",
                "neural networks",
                "NLP",
                "computer vision",
            ],
        ),
        ResearchField::make(
            "Physics",
            "Theoretical and experimental physics, quantum mechanics, astrophysics",
            &[
                "physics",
                "quantum",
                "mechanics",
                "astrophysics",
                "particle physics",
            ],
        ),
        ResearchField::make(
            "Biology",
            "Molecular biology, genetics, biochemistry, and life sciences",
            &[
                "biology",
                "genetics",
                "molecular",
                "biochemistry",
                "genomics",
            ],
        ),
        ResearchField::make(
            "Computer Science",
            "Algorithms, systems, software engineering, and theoretical CS",
            &[
                "computer science",
                "algorithms",
                "programming",
                "software",
                "systems",
            ],
        ),
        ResearchField::make(
            "Mathematics",
            "Pure and applied mathematics, statistics, and mathematical modeling",
            &[
                "mathematics",
                "statistics",
                "algebra",
                "calculus",
                "topology",
            ],
        ),
        ResearchField::make(
            "Chemistry",
            "Organic, inorganic, physical, and analytical chemistry",
            &["chemistry", "organic", "inorganic", "catalysis", "synthesis"],
        ),
        ResearchField::make(
            "Neuroscience",
            "Brain science, cognitive neuroscience, and neuroimaging",
            &[
                "neuroscience",
                "brain",
                "cognitive",
                "neuroimaging",
                "neural",
            ],
        ),
        ResearchField::make(
            "Materials Science",
            "Material properties, nanotechnology, and material design",
            &[
                "materials",
                "nanotechnology",
                "polymers",
                "composites",
                "crystals",
            ],
        ),
    ];
}
