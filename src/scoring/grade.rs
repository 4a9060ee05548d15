//! Letter grades.
//!
//! Two tables coexist on purpose: the fine six-bucket table (Traditional scanner and
//! PSEO report) and the coarse four-bucket table (AEO/GEO reports and the overall
//! grade). They are not interchangeable.

use serde::{Deserialize, Serialize};

/// A letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score-to-grade mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeTable {
    /// ≥90 A+, ≥80 A, ≥70 B, ≥60 C, ≥50 D, else F
    Fine,
    /// ≥80 A, ≥60 B, ≥40 C, else D
    Coarse,
}

impl GradeTable {
    pub fn grade(&self, score: u8) -> Grade {
        match self {
            GradeTable::Fine => match score {
                90..=u8::MAX => Grade::APlus,
                80..=89 => Grade::A,
                70..=79 => Grade::B,
                60..=69 => Grade::C,
                50..=59 => Grade::D,
                _ => Grade::F,
            },
            GradeTable::Coarse => match score {
                80..=u8::MAX => Grade::A,
                60..=79 => Grade::B,
                40..=59 => Grade::C,
                _ => Grade::D,
            },
        }
    }
}
