use core::fmt;

use serde::{Deserialize, Serialize};

/// A diploid genotype at the drive locus.
///
/// `Genotype` is a compact, Copyable representation backed by a single byte.
/// The index mapping is stable and matches the order of
/// [`hardy_weinberg`] proportions (AA=0, Aa=1, aa=2), where `A` is the drive
/// allele and `a` the wild type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Genotype {
    /// Homozygous for the drive allele
    #[serde(rename = "AA")]
    DriveHomozygote = 0,
    /// Heterozygote
    #[serde(rename = "Aa")]
    Heterozygote = 1,
    /// Homozygous wild type
    #[serde(rename = "aa")]
    WildType = 2,
}

impl Genotype {
    /// All genotypes in index order.
    pub const ALL: [Genotype; 3] = [
        Genotype::DriveHomozygote,
        Genotype::Heterozygote,
        Genotype::WildType,
    ];

    /// Convert from u8 index (0-2)
    #[inline(always)]
    pub const fn from_index(idx: u8) -> Option<Self> {
        match idx {
            0 => Some(Self::DriveHomozygote),
            1 => Some(Self::Heterozygote),
            2 => Some(Self::WildType),
            _ => None,
        }
    }

    /// Convert to the compact u8 index (0-2).
    #[inline(always)]
    pub const fn to_index(self) -> u8 {
        self as u8
    }

    /// Number of drive alleles carried (0, 1 or 2).
    #[inline(always)]
    pub const fn drive_copies(self) -> u8 {
        match self {
            Self::DriveHomozygote => 2,
            Self::Heterozygote => 1,
            Self::WildType => 0,
        }
    }

    /// Conventional two-letter symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::DriveHomozygote => "AA",
            Self::Heterozygote => "Aa",
            Self::WildType => "aa",
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Hardy-Weinberg genotype proportions `[q², 2q(1-q), (1-q)²]` for drive
/// allele frequency `q`, in [`Genotype`] index order.
#[inline]
pub fn hardy_weinberg(q: f64) -> [f64; 3] {
    [q * q, 2.0 * q * (1.0 - q), (1.0 - q) * (1.0 - q)]
}

/// Number of individuals of each genotype in a finite sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenotypeCounts {
    pub drive_homozygotes: u64,
    pub heterozygotes: u64,
    pub wild_type: u64,
}

impl GenotypeCounts {
    /// Create counts in [`Genotype`] index order.
    pub const fn new(drive_homozygotes: u64, heterozygotes: u64, wild_type: u64) -> Self {
        Self {
            drive_homozygotes,
            heterozygotes,
            wild_type,
        }
    }

    /// Count for one genotype.
    pub fn get(&self, genotype: Genotype) -> u64 {
        match genotype {
            Genotype::DriveHomozygote => self.drive_homozygotes,
            Genotype::Heterozygote => self.heterozygotes,
            Genotype::WildType => self.wild_type,
        }
    }

    /// Total number of individuals.
    pub fn total(&self) -> u64 {
        self.drive_homozygotes + self.heterozygotes + self.wild_type
    }

    /// Drive allele frequency in the sample, or `None` if the sample is empty.
    pub fn allele_frequency(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let copies = 2 * self.drive_homozygotes + self.heterozygotes;
        Some(copies as f64 / (2 * total) as f64)
    }
}
