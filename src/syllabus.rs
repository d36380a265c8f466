//! Static subject syllabus tables.

use crate::types::Subject;

const PHYSICS: &[&str] = &[
    "Units and Measurements",
    "Kinematics",
    "Laws of Motion",
    "Work, Energy and Power",
    "Rotational Motion",
    "Gravitation",
    "Properties of Solids and Liquids",
    "Thermodynamics",
    "Kinetic Theory of Gases",
    "Oscillations and Waves",
    "Electrostatics",
    "Current Electricity",
    "Magnetic Effects of Current and Magnetism",
    "Electromagnetic Induction and AC",
    "Electromagnetic Waves",
    "Optics",
    "Dual Nature of Matter and Radiation",
    "Atoms and Nuclei",
    "Electronic Devices",
    "Experimental Skills",
];

const CHEMISTRY: &[&str] = &[
    "Some Basic Concepts in Chemistry",
    "Atomic Structure",
    "Chemical Bonding & Molecular Structure",
    "Chemical Thermodynamics",
    "Solutions",
    "Equilibrium",
    "Redox Reactions and Electrochemistry",
    "Chemical Kinetics",
    "Classification of Elements",
    "p-Block Elements",
    "d and f Block Elements",
    "Coordination Compounds",
    "Purification of Organic Compounds",
    "Basic Principles of Organic Chemistry",
    "Hydrocarbons",
    "Organic Compounds containing Halogens",
    "Organic Compounds containing Oxygen",
    "Organic Compounds containing Nitrogen",
    "Biomolecules",
    "Principles Related to Practical Chemistry",
];

const MATHS: &[&str] = &[
    "Sets, Relations and Functions",
    "Complex Numbers and Quadratic Equations",
    "Matrices and Determinants",
    "Permutations and Combinations",
    "Binomial Theorem",
    "Sequence and Series",
    "Limit, Continuity and Differentiability",
    "Integral Calculus",
    "Differential Equations",
    "Co-ordinate Geometry",
    "Three Dimensional Geometry",
    "Vector Algebra",
    "Statistics and Probability",
    "Trigonometry",
];

/// Topic labels for `subject`, in syllabus order.
pub fn topics(subject: Subject) -> &'static [&'static str] {
    match subject {
        Subject::Physics => PHYSICS,
        Subject::Chemistry => CHEMISTRY,
        Subject::Maths => MATHS,
    }
}

/// Returns true when `topic` appears in the syllabus for `subject`.
pub fn is_known_topic(subject: Subject, topic: &str) -> bool {
    topics(subject).contains(&topic)
}
