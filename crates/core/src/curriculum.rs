//! The fixed curriculum: every (subject, category, title) the tracker knows.
//!
//! This is static reference data. Storage seeds durable records from it once
//! at startup; nothing here is mutated at runtime. Ordinals are 1-based
//! positions within a subject's list, which is ordered by category.

use crate::model::{Category, Subject};

/// One chapter of the fixed curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurriculumEntry {
    pub subject: Subject,
    pub category: Category,
    pub ordinal: u32,
    pub title: &'static str,
}

const PHYSICS: &[(Category, &str)] = &[
    (Category::One, "Current Electricity"),
    (Category::One, "Semiconductors"),
    (Category::One, "Thermodynamics"),
    (Category::One, "Calorimetry and Conduction"),
    (Category::One, "Kinetic Theory Of Gases"),
    (Category::One, "Properties of Solids"),
    (Category::One, "Fluid Mechanics"),
    (Category::One, "Capacitance"),
    (Category::One, "Gravitation"),
    (Category::One, "Units And Dimensions"),
    (Category::One, "Alternating Current"),
    (Category::Two, "Dual Nature of Particles"),
    (Category::Two, "Electrostatics"),
    (Category::Two, "Rotational Motion"),
    (Category::Two, "Electromagnetic Waves"),
    (Category::Two, "Ray Optics"),
    (Category::Two, "Waves And Sound"),
    (Category::Two, "Oscillations"),
    (Category::Two, "Magnetic Effects Of Current"),
    (Category::Two, "Electromagnetic Induction"),
    (Category::Two, "Center Of Mass And Momentum"),
    (Category::Three, "Wave Optics"),
    (Category::Three, "Atoms and Nuclei"),
    (Category::Three, "Work Power Energy"),
    (Category::Three, "Kinematics"),
    (Category::Three, "Laws Of Motion"),
    (Category::Four, "Experimental Physics"),
    (Category::Four, "Magnetism"),
    (Category::Four, "Heat Transfer"),
];

const MATHEMATICS: &[(Category, &str)] = &[
    (Category::One, "Matrices And Determinants"),
    (Category::One, "Sequence And Series"),
    (Category::One, "Straight Line"),
    (Category::One, "Probability"),
    (Category::One, "Complex Numbers"),
    (Category::One, "Functions"),
    (Category::One, "Indefinite Integration"),
    (Category::One, "Statistics"),
    (Category::Two, "Vector 3D"),
    (Category::Two, "Binomial Theorem"),
    (Category::Two, "Application Of Derivatives"),
    (Category::Two, "Circle"),
    (Category::Two, "Definite Integration"),
    (Category::Two, "Differential Equation"),
    (Category::Two, "Parabola"),
    (Category::Two, "Application of Integrals"),
    (Category::Two, "Quadratic Equations"),
    (Category::Two, "Vector"),
    (Category::Two, "Limits"),
    (Category::Three, "Continutity And Differentiability"),
    (Category::Three, "Hyperbola"),
    (Category::Three, "Trigonometry"),
    (Category::Three, "Set Theory And Relations"),
    (Category::Four, "Permutation And Combination"),
    (Category::Four, "Ellipse"),
    (Category::Four, "Differentiation"),
    (Category::Four, "Inverse Trigonometric Functions"),
];

const CHEMISTRY: &[(Category, &str)] = &[
    (Category::One, "Biomolecules"),
    (Category::One, "P Block Elements"),
    (Category::One, "Mole Concept"),
    (Category::One, "Atomic Structure"),
    (Category::One, "Electrochemistry"),
    (Category::One, "Solutions"),
    (Category::One, "Some Basic Principles of Organic Chemistry"),
    (Category::Two, "Coordination Compounds"),
    (Category::Two, "Chemical Thermodynamics"),
    (Category::Two, "General Organic Chemistry"),
    (Category::Two, "Hydrocarbons"),
    (Category::Two, "Halogen Containing Compounds"),
    (Category::Two, "Aldehyde, Ketones and Carboxylic Acids"),
    (Category::Two, "Amines"),
    (Category::Two, "Chemical Kinetics"),
    (Category::Two, "Chemical Bonding"),
    (Category::Two, "D and F block elements"),
    (Category::Three, "Periodicity"),
    (Category::Three, "Purification and Characterisation of Organic Compounds"),
    (Category::Three, "Chemical Equilibrium"),
    (Category::Four, "Alcohols Phenols And Ethers"),
    (Category::Four, "Ionic Equilibrium"),
    (Category::Four, "Redox Reactions"),
    (Category::Four, "Qualitative Inorganic Chemistry"),
];

/// Ordered (category, title) list for one subject.
#[must_use]
pub fn subject_chapters(subject: Subject) -> &'static [(Category, &'static str)] {
    match subject {
        Subject::Physics => PHYSICS,
        Subject::Mathematics => MATHEMATICS,
        Subject::Chemistry => CHEMISTRY,
    }
}

/// Every curriculum entry across all subjects, with assigned ordinals.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn entries() -> Vec<CurriculumEntry> {
    let mut all = Vec::new();
    for subject in Subject::ALL {
        for (idx, (category, title)) in subject_chapters(subject).iter().enumerate() {
            all.push(CurriculumEntry {
                subject,
                category: *category,
                ordinal: idx as u32 + 1,
                title,
            });
        }
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn chapter_counts_per_subject() {
        assert_eq!(subject_chapters(Subject::Physics).len(), 29);
        assert_eq!(subject_chapters(Subject::Mathematics).len(), 27);
        assert_eq!(subject_chapters(Subject::Chemistry).len(), 24);
        assert_eq!(entries().len(), 80);
    }

    #[test]
    fn titles_are_unique_within_a_subject() {
        for subject in Subject::ALL {
            let titles: HashSet<_> = subject_chapters(subject)
                .iter()
                .map(|(_, title)| *title)
                .collect();
            assert_eq!(titles.len(), subject_chapters(subject).len());
        }
    }

    #[test]
    fn ordinals_are_one_based_and_sequential() {
        for subject in Subject::ALL {
            let subject_entries: Vec<_> = entries()
                .into_iter()
                .filter(|e| e.subject == subject)
                .collect();
            for (idx, entry) in subject_entries.iter().enumerate() {
                assert_eq!(entry.ordinal, idx as u32 + 1);
            }
        }
    }

    #[test]
    fn categories_appear_in_tier_order() {
        for subject in Subject::ALL {
            let categories: Vec<_> = subject_chapters(subject)
                .iter()
                .map(|(category, _)| *category)
                .collect();
            let mut sorted = categories.clone();
            sorted.sort();
            assert_eq!(categories, sorted);
        }
    }
}
