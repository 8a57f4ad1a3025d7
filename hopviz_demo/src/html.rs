// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-file HTML report around the rendered keyframes.

use hopviz_anim::data::{
    BIBTEX, EXAMPLE_PASSAGES, EXAMPLE_QUERY, RESULTS_BENCHMARKS, RESULTS_TABLE,
};
use hopviz_scene::SiteConfig;

use crate::svg::escape_xml;

#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) svg: String,
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem auto;max-width:1280px;\
color:#111827;background:#f9fafb}\
header{display:flex;align-items:center;gap:1rem}\
header img{height:48px;border-radius:8px}\
section{background:#fff;border:1px solid #e5e7eb;border-radius:12px;padding:1rem;margin:1rem 0}\
section p{color:#6b7280;margin:.25rem 0 .75rem}\
pre{background:#f3f4f6;padding:1rem;border-radius:8px;overflow-x:auto}\
ol li{margin:.25rem 0}\
table.results{border-collapse:collapse;width:100%;font-size:12px;background:#fff}\
table.results th,table.results td{padding:4px 6px;text-align:center;border-bottom:1px solid #f3f4f6}\
table.results td.model{text-align:left}\
table.results .group{border-left:1px solid #e5e7eb}\
table.results tr.main{background:#eff6ff;font-weight:600}\
table.results tr.separator td{background:#f3f4f6;font-style:italic;text-align:left}";

pub(crate) fn render_report(title: &str, site: &SiteConfig, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_xml(title)));
    out.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));

    out.push_str("<header>\n");
    out.push_str(&format!(
        "<img src=\"{}\" alt=\"GRITHopper logo\">\n",
        escape_xml(&site.asset_path("/logos/grithopper-logo.jpeg"))
    ));
    out.push_str(&format!("<h1>{}</h1>\n</header>\n", escape_xml(title)));

    out.push_str(&format!(
        "<p><strong>Query:</strong> {}</p>\n<ol>\n",
        escape_xml(EXAMPLE_QUERY)
    ));
    for passage in &EXAMPLE_PASSAGES {
        out.push_str(&format!(
            "<li><strong>D{} {}</strong>: {}</li>\n",
            passage.id,
            escape_xml(passage.title),
            escape_xml(passage.snippet)
        ));
    }
    out.push_str("</ol>\n");

    for section in sections {
        out.push_str("<section>\n");
        out.push_str(&format!("<h2>{}</h2>\n", escape_xml(&section.title)));
        out.push_str(&format!("<p>{}</p>\n", escape_xml(&section.description)));
        // Inline SVG is already well-formed markup.
        out.push_str(&section.svg);
        out.push_str("</section>\n");
    }

    push_results_table(&mut out);

    out.push_str("<h2>Citation</h2>\n");
    out.push_str(&format!("<pre>{}</pre>\n", escape_xml(BIBTEX)));
    out.push_str("</body>\n</html>\n");
    out
}

fn push_results_table(out: &mut String) {
    out.push_str("<h2>Open Retrieval Performance (Hits@1)</h2>\n<table class=\"results\">\n");
    out.push_str("<thead>\n<tr><th rowspan=\"2\">Model</th>");
    for bench in &RESULTS_BENCHMARKS {
        let marker = if bench.zero_shot { "*" } else { "" };
        out.push_str(&format!(
            "<th class=\"group\" colspan=\"{}\">{}{marker}</th>",
            bench.hop_depths + 1,
            escape_xml(bench.name)
        ));
    }
    out.push_str("</tr>\n<tr>");
    for bench in &RESULTS_BENCHMARKS {
        for depth in 1..=bench.hop_depths {
            let class = if depth == 1 { " class=\"group\"" } else { "" };
            out.push_str(&format!("<th{class}>H{depth}</th>"));
        }
        out.push_str("<th>Avg</th>");
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    let columns = 1 + RESULTS_BENCHMARKS.iter().map(|b| b.hop_depths + 1).sum::<usize>();
    let mut in_decomposition = false;
    for row in &RESULTS_TABLE {
        if row.decomposition && !in_decomposition {
            in_decomposition = true;
            out.push_str(&format!(
                "<tr class=\"separator\"><td colspan=\"{columns}\">\
                 Decomposition-based (LLM + retriever)</td></tr>\n"
            ));
        }
        let class = if row.is_main { " class=\"main\"" } else { "" };
        out.push_str(&format!("<tr{class}><td class=\"model\">{}</td>", escape_xml(row.model)));
        for scores in &row.scores {
            for (i, hop) in scores.hops.iter().enumerate() {
                let class = if i == 0 { " class=\"group\"" } else { "" };
                out.push_str(&format!("<td{class}>{}</td>", score_cell(*hop)));
            }
            out.push_str(&format!("<td><strong>{}</strong></td>", score_cell(scores.average)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out.push_str(
        "<p>*MoreHopQA is a zero-shot (out-of-distribution) benchmark. \
         H1-H4 = hop depth. MultiHop-RAG results are in the chart above.</p>\n",
    );
}

fn score_cell(score: Option<f64>) -> String {
    score.map_or_else(|| String::from("-"), |v| format!("{v:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_uses_site_base_path() {
        let html = render_report("t", &SiteConfig::new("/base/"), &[]);
        assert!(html.contains(r#"src="/base/logos/grithopper-logo.jpeg""#), "{html}");
        assert!(html.contains("erker2026grithopper"), "{html}");
    }

    #[test]
    fn results_table_lists_every_model() {
        let html = render_report("t", &SiteConfig::default(), &[]);
        assert!(html.contains("Open Retrieval Performance (Hits@1)"), "{html}");
        for row in &RESULTS_TABLE {
            assert!(html.contains(row.model), "{}", row.model);
        }
        assert!(html.contains("<td>76.13</td>"), "{html}");
        assert!(html.contains("<td><strong>76.42</strong></td>"), "{html}");
        assert!(html.contains(r#"<th class="group" colspan="3">MoreHopQA*</th>"#), "{html}");
        assert_eq!(html.matches("Decomposition-based").count(), 1);
    }

    #[test]
    fn missing_scores_render_as_dashes() {
        assert_eq!(score_cell(None), "-");
        assert_eq!(score_cell(Some(5.4)), "5.40");
    }

    #[test]
    fn sections_are_escaped() {
        let sections = [HtmlSection {
            title: "a < b".to_owned(),
            description: "x & y".to_owned(),
            svg: "<svg/>".to_owned(),
        }];
        let html = render_report("t", &SiteConfig::default(), &sections);
        assert!(html.contains("<h2>a &lt; b</h2>"), "{html}");
        assert!(html.contains("<p>x &amp; y</p>"), "{html}");
        assert!(html.contains("<svg/>"), "{html}");
    }
}
