use serde::{Deserialize, Serialize};

use crate::metrics::MmdKind;

/// Score for one generator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MmdEntry {
    pub generator: String,
    pub score: f64,
    /// Synthetic rows that went into the score
    pub sequences: usize,
}

/// MMD scores of every generator against the same real sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MmdReport {
    pub bandwidth: f64,
    pub kind: MmdKind,
    pub seq_len: usize,
    pub real_sequences: usize,
    pub entries: Vec<MmdEntry>,
}

impl MmdReport {
    /// Entries ordered from closest to furthest
    pub fn ranked(&self) -> Vec<&MmdEntry> {
        let mut ranked: Vec<&MmdEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
        ranked
    }

    /// Generator whose samples sit closest to the real data
    pub fn best(&self) -> Option<&MmdEntry> {
        self.entries
            .iter()
            .filter(|e| !e.score.is_nan())
            .min_by(|a, b| a.score.total_cmp(&b.score))
    }

    pub fn score_of(&self, generator: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.generator == generator)
            .map(|e| e.score)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Print a formatted report to stdout
    pub fn print_report(&self) {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║           SYNTHETIC DATA SIMILARITY REPORT            ║");
        println!("╚═══════════════════════════════════════════════════════╝\n");

        println!("📐 SETUP");
        println!("  Estimator:             {:?} MMD²", self.kind);
        println!("  Bandwidth (sigma):     {}", self.bandwidth);
        println!("  Sequence Length:       {}", self.seq_len);
        println!("  Real Sequences:        {}", self.real_sequences);

        println!("\n📊 SCORES (lower is closer)");
        for entry in &self.entries {
            println!("  MMD (Real vs {}): {:.6}", entry.generator, entry.score);
        }

        let ranked = self.ranked();
        if ranked.len() > 1 {
            println!("\n{:<30} {:>14} {:>10}", "Generator", "MMD²", "Rows");
            println!("{}", "─".repeat(56));
            for entry in &ranked {
                println!(
                    "{:<30} {:>14.6} {:>10}",
                    entry.generator, entry.score, entry.sequences
                );
            }
        }

        if let Some(best) = self.best() {
            println!("\n🏆 Closest Generator: {} ({:.6})", best.generator, best.score);
        }

        println!("\n═══════════════════════════════════════════════════════\n");
    }
}
