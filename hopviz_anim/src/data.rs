// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed page content read by the surfaces.
//!
//! Nothing here is mutated; surfaces borrow these tables directly.

use peniko::Color;

/// One passage in the scripted retrieval chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Passage {
    /// One-based passage id (`D{id}` on badges).
    pub id: u32,
    /// Short title.
    pub title: &'static str,
    /// Snippet shown in the badge tooltip and on the flying card.
    pub snippet: &'static str,
}

/// A benchmark series for the hop-depth chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceSeries {
    /// Stable key.
    pub name: &'static str,
    /// Legend label.
    pub display_name: &'static str,
    /// Line color.
    pub color: Color,
    /// Hits@1 per hop depth, in percent.
    pub values: [f64; 4],
    /// The model the page is about; revealed hop by hop.
    pub is_main: bool,
}

/// The illustrative multi-hop question.
pub const EXAMPLE_QUERY: &str = "Where does the body of water by the city that shares a border with \
     Elizabeth Berg's birthplace and Ohio River meet?";

/// Passages retrieved by the four hops, in order.
///
/// The fourth is found by the last hop but never appended to the context.
pub static EXAMPLE_PASSAGES: [Passage; 4] = [
    Passage {
        id: 1,
        title: "Elizabeth Berg",
        snippet: "Elizabeth Berg was born in Saint Paul, Minnesota...",
    },
    Passage {
        id: 2,
        title: "Saint Paul Geography",
        snippet: "Saint Paul shares a border with Minneapolis, located along the Mississippi River...",
    },
    Passage {
        id: 3,
        title: "Minneapolis Rivers",
        snippet: "The Mississippi River flows through Minneapolis and continues south...",
    },
    Passage {
        id: 4,
        title: "River Confluence",
        snippet: "The Mississippi River meets the Ohio River at Cairo, Illinois...",
    },
];

/// X-axis labels of the benchmark chart.
pub const HOP_LABELS: [&str; 4] = ["Hop 1", "Hop 2", "Hop 3", "Hop 4"];

/// `MultiHop-RAG` Hits@1 per hop depth.
pub static PERFORMANCE_SERIES: [PerformanceSeries; 5] = [
    PerformanceSeries {
        name: "grithopper",
        display_name: "GRITHopper-7B (ours)",
        color: Color::from_rgb8(0x3b, 0x82, 0xf6),
        values: [76.98, 55.92, 27.89, 18.59],
        is_main: true,
    },
    PerformanceSeries {
        name: "gritlm",
        display_name: "GRITLM-7B (Muennighoff et al., 2024)",
        color: Color::from_rgb8(0x8b, 0x5c, 0xf6),
        values: [78.23, 27.23, 4.85, 2.51],
        is_main: false,
    },
    PerformanceSeries {
        name: "beamretriever",
        display_name: "BeamRetriever (Zhang et al., NAACL 2024)",
        color: Color::from_rgb8(0xec, 0x48, 0x99),
        values: [43.24, 13.13, 5.95, 2.76],
        is_main: false,
    },
    PerformanceSeries {
        name: "gpt4o",
        display_name: "GPT-4o + GRITLM (decomposition-based)",
        color: Color::from_rgb8(0x10, 0xb9, 0x81),
        values: [67.23, 47.27, 19.81, 8.54],
        is_main: false,
    },
    PerformanceSeries {
        name: "qwen",
        display_name: "Qwen2.5-32B + GRITLM (decomposition-based)",
        color: Color::from_rgb8(0xf5, 0x9e, 0x0b),
        values: [53.30, 29.53, 11.31, 6.78],
        is_main: false,
    },
];

/// Encoder output strip values, one row per hop (indexed `hop % 4`).
pub static TENSOR_VALUES: [[f64; 12]; 4] = [
    [0.8, 0.3, 0.9, 0.2, 0.7, 0.5, 0.4, 0.6, 0.85, 0.35, 0.65, 0.45],
    [0.6, 0.7, 0.4, 0.8, 0.3, 0.9, 0.5, 0.2, 0.75, 0.55, 0.25, 0.95],
    [0.4, 0.5, 0.7, 0.6, 0.8, 0.3, 0.9, 0.4, 0.65, 0.85, 0.45, 0.35],
    [0.9, 0.4, 0.5, 0.7, 0.2, 0.8, 0.6, 0.3, 0.55, 0.75, 0.95, 0.25],
];

/// A benchmark column group of the open retrieval results table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResultsBenchmark {
    /// Column group heading.
    pub name: &'static str,
    /// Number of hop-depth columns before the average.
    pub hop_depths: usize,
    /// Evaluated zero-shot, outside the training distribution.
    pub zero_shot: bool,
}

/// Benchmarks of [`RESULTS_TABLE`], in column order.
pub static RESULTS_BENCHMARKS: [ResultsBenchmark; 4] = [
    ResultsBenchmark {
        name: "MuSiQue",
        hop_depths: 4,
        zero_shot: false,
    },
    ResultsBenchmark {
        name: "HoVer",
        hop_depths: 4,
        zero_shot: false,
    },
    ResultsBenchmark {
        name: "ExFever",
        hop_depths: 3,
        zero_shot: false,
    },
    ResultsBenchmark {
        name: "MoreHopQA",
        hop_depths: 2,
        zero_shot: true,
    },
];

/// One model's Hits@1 on one benchmark; `None` where it was not reported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenchmarkScores {
    /// Per hop depth, from hop 1.
    pub hops: &'static [Option<f64>],
    /// Average over all depths.
    pub average: Option<f64>,
}

/// A row of the open retrieval results table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResultsRow {
    /// Model label.
    pub model: &'static str,
    /// The model the page is about.
    pub is_main: bool,
    /// An LLM decomposes the question and a retriever answers each step.
    pub decomposition: bool,
    /// Scores, one entry per [`RESULTS_BENCHMARKS`] column group.
    pub scores: [BenchmarkScores; 4],
}

/// Open retrieval Hits@1 by hop depth. `MultiHop-RAG` is charted separately.
pub static RESULTS_TABLE: [ResultsRow; 6] = [
    ResultsRow {
        model: "GRITHopper (ours)",
        is_main: true,
        decomposition: false,
        scores: [
            BenchmarkScores {
                hops: &[Some(94.25), Some(76.13), Some(55.45), Some(32.10)],
                average: Some(76.42),
            },
            BenchmarkScores {
                hops: &[Some(95.86), Some(91.56), Some(91.69), Some(92.31)],
                average: Some(93.88),
            },
            BenchmarkScores {
                hops: &[Some(96.88), Some(92.20), Some(85.38)],
                average: Some(93.02),
            },
            BenchmarkScores {
                hops: &[Some(96.96), Some(93.92)],
                average: Some(95.44),
            },
        ],
    },
    ResultsRow {
        model: "GRITLM-7B",
        is_main: false,
        decomposition: false,
        scores: [
            BenchmarkScores {
                hops: &[Some(91.15), Some(57.51), Some(22.32), Some(5.43)],
                average: Some(60.51),
            },
            BenchmarkScores {
                hops: &[Some(95.81), Some(88.09), Some(83.95), Some(88.46)],
                average: Some(91.81),
            },
            BenchmarkScores {
                hops: &[Some(91.13), Some(54.88), Some(17.28)],
                average: Some(63.83),
            },
            BenchmarkScores {
                hops: &[Some(98.75), Some(95.53)],
                average: Some(97.14),
            },
        ],
    },
    ResultsRow {
        model: "BeamRetriever",
        is_main: false,
        decomposition: false,
        scores: [
            BenchmarkScores {
                hops: &[Some(88.75), Some(60.70), Some(30.73), Some(12.84)],
                average: Some(62.80),
            },
            BenchmarkScores {
                hops: &[Some(98.04), Some(88.96), Some(85.96), Some(76.92)],
                average: Some(93.42),
            },
            BenchmarkScores {
                hops: &[None, None, None],
                average: None,
            },
            BenchmarkScores {
                hops: &[Some(97.85), Some(93.02)],
                average: Some(95.44),
            },
        ],
    },
    ResultsRow {
        model: "MDR",
        is_main: false,
        decomposition: false,
        scores: [
            BenchmarkScores {
                hops: &[Some(81.75), Some(45.18), None, None],
                average: Some(63.47),
            },
            BenchmarkScores {
                hops: &[Some(84.77), Some(65.69), None, None],
                average: Some(77.10),
            },
            BenchmarkScores {
                hops: &[Some(92.93), Some(77.16), None],
                average: Some(85.13),
            },
            BenchmarkScores {
                hops: &[Some(88.73), Some(75.58)],
                average: Some(82.16),
            },
        ],
    },
    ResultsRow {
        model: "Qwen2.5-32B + GRITLM",
        is_main: false,
        decomposition: true,
        scores: [
            BenchmarkScores {
                hops: &[Some(82.62), Some(45.72), Some(13.91), Some(1.48)],
                average: Some(51.06),
            },
            BenchmarkScores {
                hops: &[Some(75.38), Some(61.44), Some(50.43), Some(46.15)],
                average: Some(67.69),
            },
            BenchmarkScores {
                hops: &[Some(63.24), Some(29.88), Some(11.93)],
                average: Some(40.90),
            },
            BenchmarkScores {
                hops: &[Some(96.24), Some(55.19)],
                average: Some(75.72),
            },
        ],
    },
    ResultsRow {
        model: "GPT-4o + GRITLM",
        is_main: false,
        decomposition: true,
        scores: [
            BenchmarkScores {
                hops: &[Some(81.96), Some(48.53), Some(13.39), Some(1.98)],
                average: Some(51.81),
            },
            BenchmarkScores {
                hops: &[None, None, None, None],
                average: None,
            },
            BenchmarkScores {
                hops: &[None, None, None],
                average: None,
            },
            BenchmarkScores {
                hops: &[None, None],
                average: None,
            },
        ],
    },
];

/// `BibTeX` entry offered by the citation box.
pub const BIBTEX: &str = r"@inproceedings{erker2026grithopper,
  title={{GRITHopper}: Decomposition-Free Multi-Hop Dense Retrieval},
  author={Erker, Justus-Jonas and Reimers, Nils and Gurevych, Iryna},
  booktitle={Proceedings of the 2026 Conference of the European Chapter of the Association for Computational Linguistics (EACL)},
  year={2026},
  url={https://arxiv.org/abs/2503.07519}
}";

/// Passage returned by `hop`, if the chain has one.
pub fn passage_for_hop(hop: u32) -> Option<&'static Passage> {
    EXAMPLE_PASSAGES.get(hop as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_main_series() {
        assert_eq!(PERFORMANCE_SERIES.iter().filter(|s| s.is_main).count(), 1);
        assert!(PERFORMANCE_SERIES[0].is_main);
    }

    #[test]
    fn results_rows_match_benchmark_columns() {
        for row in &RESULTS_TABLE {
            for (bench, scores) in RESULTS_BENCHMARKS.iter().zip(&row.scores) {
                assert_eq!(scores.hops.len(), bench.hop_depths, "{} on {}", row.model, bench.name);
            }
        }
        assert_eq!(RESULTS_TABLE.iter().filter(|r| r.is_main).count(), 1);
    }

    #[test]
    fn decomposition_rows_come_last() {
        let first = RESULTS_TABLE.iter().position(|r| r.decomposition).unwrap();
        assert!(RESULTS_TABLE[first..].iter().all(|r| r.decomposition));
    }

    #[test]
    fn passages_are_numbered_in_order() {
        for (i, p) in EXAMPLE_PASSAGES.iter().enumerate() {
            assert_eq!(p.id as usize, i + 1);
        }
        assert!(passage_for_hop(4).is_none());
    }
}
