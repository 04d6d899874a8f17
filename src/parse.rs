use regex::Regex;

/// Where a parsed analysis came from: section markers found in the
/// text, or the whole-text fallback when no markers matched. Callers
/// can tell a real parse from best-effort string surgery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    Markers,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub sections: Vec<Section>,
    pub source: AnalysisSource,
}

impl Analysis {
    #[cfg(test)]
    pub fn get(&self, title: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.content.as_str())
    }
}

const OVERALL_FEEDBACK: &str = "Overall Feedback";

/// Split an AI resume-analysis blob into labeled sections.
///
/// The backend returns prose, not JSON, so this is a heuristic: scan
/// for `**Title:**` markers, capture each section's content up to the
/// next `**` occurrence (or end of input), strip remaining literal
/// asterisks, and put any trailing unmarked text under
/// "Overall Feedback". Zero markers yields a single fallback section
/// with the whole text; empty input yields no sections. It never
/// fails; malformed markers can mis-capture.
pub fn parse_analysis(text: &str) -> Analysis {
    if text.trim().is_empty() {
        return Analysis {
            sections: Vec::new(),
            source: AnalysisSource::Fallback,
        };
    }

    let marker = Regex::new(r"\*\*([^*]+?):\*\*").expect("section marker pattern is valid");
    let matches: Vec<(String, usize)> = marker
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let title = caps.get(1)?.as_str().trim().to_string();
            Some((title, whole.end()))
        })
        .collect();

    if matches.is_empty() {
        return Analysis {
            sections: vec![Section {
                title: OVERALL_FEEDBACK.to_string(),
                content: strip_asterisks(text),
            }],
            source: AnalysisSource::Fallback,
        };
    }

    let mut sections = Vec::with_capacity(matches.len());
    let mut consumed = 0;

    for (title, end) in &matches {
        let rest = &text[*end..];
        let (content, content_end) = match rest.find("**") {
            Some(idx) => (&rest[..idx], *end + idx + 2),
            None => (rest, text.len()),
        };
        sections.push(Section {
            title: title.clone(),
            content: strip_asterisks(content),
        });
        consumed = content_end;
    }

    // Anything after the last section's closing marker is unlabeled
    // summary text.
    let trailing = strip_asterisks(&text[consumed.min(text.len())..]);
    if !trailing.is_empty() {
        sections.push(Section {
            title: OVERALL_FEEDBACK.to_string(),
            content: trailing,
        });
    }

    Analysis {
        sections,
        source: AnalysisSource::Markers,
    }
}

fn strip_asterisks(text: &str) -> String {
    text.replace('*', "").trim().to_string()
}

/// One pseudo-job pulled out of recommendation prose. Fabricated
/// presentation data (company, location, score) is layered on later by
/// the placeholder generator; this split is pure and deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecSection {
    pub title: String,
    pub description: String,
}

/// Split recommendation prose on blank lines; every paragraph with a
/// colon becomes a title/description pair, the rest are skipped.
pub fn split_recommendations(text: &str) -> Vec<RecSection> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .filter_map(|paragraph| {
            let paragraph = paragraph.trim();
            let (before, after) = paragraph.split_once(':')?;
            let title = strip_asterisks(before);
            if title.is_empty() {
                return None;
            }
            Some(RecSection {
                title,
                description: after.trim().to_string(),
            })
        })
        .collect()
}
