//! Text renderer for sequence diagrams
//!
//! Understands the common subset of mermaid's `sequenceDiagram` syntax:
//!
//! ```text
//! sequenceDiagram
//!     participant C as Client
//!     participant M as Mock server
//!     C->>M: GET /users
//!     M-->>C: 200
//!     Note right of M: matched mock 1f3a
//! ```
//!
//! Arrows: `->>` solid with head, `-->>` dashed with head, `->` solid open,
//! `-->` dashed open. `%%` starts a comment line. `autonumber`, `title`
//! and `activate`/`deactivate` are accepted and ignored.

use std::sync::LazyLock;

use regex::Regex;

use super::{DiagramError, DiagramRenderer, Fragment};

static PARTICIPANT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:participant|actor)\s+(?P<id>.+?)(?:\s+as\s+(?P<alias>.+))?$")
        .expect("participant regex is valid")
});

static MESSAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<from>[^:]+?)\s*(?P<arrow>-->>|->>|-->|->)\s*(?P<to>[^:]+?)\s*:\s*(?P<text>.*)$")
        .expect("message regex is valid")
});

static NOTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[Nn]ote\s+(?P<place>over|left of|right of)\s+(?P<first>[^,:]+?)(?:\s*,\s*(?P<second>[^:]+?))?\s*:\s*(?P<text>.*)$",
    )
    .expect("note regex is valid")
});

const HEADER: &str = "sequenceDiagram";

/// Gap kept on each side of message text between two lifelines
const TEXT_PADDING: usize = 2;

/// Minimum distance between two lifelines
const MIN_LIFELINE_GAP: usize = 6;

// ─────────────────────────────────────────────────────────────────────────────
// Parsed model
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
struct Participant {
    id: String,
    label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NotePlacement {
    Over(usize, Option<usize>),
    LeftOf(usize),
    RightOf(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Message {
        from: usize,
        to: usize,
        style: LineStyle,
        head: bool,
        text: String,
    },
    Note {
        placement: NotePlacement,
        text: String,
    },
}

#[derive(Debug, Default)]
struct Diagram {
    participants: Vec<Participant>,
    events: Vec<Event>,
}

impl Diagram {
    /// Index of participant `id`, declaring it on first use.
    fn participant(&mut self, id: &str) -> usize {
        if let Some(i) = self.participants.iter().position(|p| p.id == id) {
            return i;
        }
        self.participants.push(Participant {
            id: id.to_string(),
            label: id.to_string(),
        });
        self.participants.len() - 1
    }
}

fn parse(source: &str) -> Result<Diagram, DiagramError> {
    let mut diagram = Diagram::default();
    let mut seen_header = false;

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with("%%") {
            continue;
        }

        if !seen_header {
            if line != HEADER {
                return Err(DiagramError::parse(
                    line_no,
                    format!("expected `{HEADER}`, found `{line}`"),
                ));
            }
            seen_header = true;
            continue;
        }

        if line == "autonumber"
            || line.starts_with("title ")
            || line.starts_with("activate ")
            || line.starts_with("deactivate ")
        {
            continue;
        }

        if let Some(caps) = PARTICIPANT_PATTERN.captures(line) {
            let id = caps["id"].trim();
            let index = diagram.participant(id);
            if let Some(alias) = caps.name("alias") {
                diagram.participants[index].label = alias.as_str().trim().to_string();
            }
            continue;
        }

        if let Some(caps) = NOTE_PATTERN.captures(line) {
            let first = diagram.participant(caps["first"].trim());
            let placement = match &caps["place"] {
                "over" => {
                    let second = caps
                        .name("second")
                        .map(|m| diagram.participant(m.as_str().trim()));
                    NotePlacement::Over(first, second)
                }
                "left of" => NotePlacement::LeftOf(first),
                _ => NotePlacement::RightOf(first),
            };
            diagram.events.push(Event::Note {
                placement,
                text: caps["text"].trim().to_string(),
            });
            continue;
        }

        if let Some(caps) = MESSAGE_PATTERN.captures(line) {
            let from = diagram.participant(caps["from"].trim());
            let to = diagram.participant(caps["to"].trim());
            let arrow = &caps["arrow"];
            diagram.events.push(Event::Message {
                from,
                to,
                style: if arrow.starts_with("--") {
                    LineStyle::Dashed
                } else {
                    LineStyle::Solid
                },
                head: arrow.ends_with(">>"),
                text: caps["text"].trim().to_string(),
            });
            continue;
        }

        return Err(DiagramError::parse(
            line_no,
            format!("unrecognised statement `{line}`"),
        ));
    }

    if !seen_header {
        return Err(DiagramError::parse(1, "empty diagram"));
    }
    Ok(diagram)
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

fn width(s: &str) -> usize {
    s.chars().count()
}

/// Growable character grid
#[derive(Debug, Default)]
struct Canvas {
    rows: Vec<Vec<char>>,
}

impl Canvas {
    fn new_row(&mut self) -> usize {
        self.rows.push(Vec::new());
        self.rows.len() - 1
    }

    fn put(&mut self, row: usize, col: usize, ch: char) {
        let line = &mut self.rows[row];
        if line.len() <= col {
            line.resize(col + 1, ' ');
        }
        line[col] = ch;
    }

    fn put_str(&mut self, row: usize, col: usize, s: &str) {
        for (i, ch) in s.chars().enumerate() {
            self.put(row, col + i, ch);
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.rows
            .into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

/// Lifeline column of every participant.
fn lifeline_columns(diagram: &Diagram) -> Vec<usize> {
    let boxes: Vec<usize> = diagram
        .participants
        .iter()
        .map(|p| width(&p.label) + 4)
        .collect();

    let mut centers = Vec::with_capacity(boxes.len());
    for (i, box_width) in boxes.iter().enumerate() {
        let center = match i {
            0 => box_width / 2,
            _ => {
                let prev = centers[i - 1];
                let gap = (boxes[i - 1] / 2 + box_width / 2 + 2).max(MIN_LIFELINE_GAP);
                prev + gap
            }
        };
        centers.push(center);
    }

    // Widen gaps until every message label fits between its lifelines
    for event in &diagram.events {
        if let Event::Message { from, to, text, .. } = event {
            if from == to {
                continue;
            }
            let (lo, hi) = ((*from).min(*to), (*from).max(*to));
            let needed = width(text) + 2 * TEXT_PADDING;
            let have = centers[hi] - centers[lo];
            if have < needed {
                let shift = needed - have;
                for center in centers.iter_mut().skip(hi) {
                    *center += shift;
                }
            }
        }
    }

    centers
}

fn draw_boxes(canvas: &mut Canvas, diagram: &Diagram, centers: &[usize], footer: bool) {
    let top = canvas.new_row();
    let mid = canvas.new_row();
    let bottom = canvas.new_row();

    for (participant, &center) in diagram.participants.iter().zip(centers) {
        let inner = width(&participant.label) + 2;
        let left = center.saturating_sub((inner + 2) / 2);
        let rule = "─".repeat(inner);

        canvas.put_str(top, left, &format!("┌{rule}┐"));
        canvas.put_str(mid, left, &format!("│ {} │", participant.label));
        canvas.put_str(bottom, left, &format!("└{rule}┘"));
        if footer {
            canvas.put(top, center, '┴');
        } else {
            canvas.put(bottom, center, '┬');
        }
    }
}

fn lifeline_row(canvas: &mut Canvas, centers: &[usize]) -> usize {
    let row = canvas.new_row();
    for &center in centers {
        canvas.put(row, center, '│');
    }
    row
}

fn draw_message(
    canvas: &mut Canvas,
    centers: &[usize],
    (from, to): (usize, usize),
    style: LineStyle,
    head: bool,
    text: &str,
) {
    let fill = match style {
        LineStyle::Solid => '─',
        LineStyle::Dashed => '╌',
    };

    if from == to {
        let center = centers[from];
        let label = lifeline_row(canvas, centers);
        canvas.put_str(label, center + TEXT_PADDING, text);

        let out = lifeline_row(canvas, centers);
        canvas.put_str(out, center + 1, &format!("{fill}{fill}{fill}┐"));
        let back = lifeline_row(canvas, centers);
        let tip = if head { '◀' } else { fill };
        canvas.put_str(back, center + 1, &format!("{tip}{fill}{fill}┘"));
        return;
    }

    let (lo, hi) = (centers[from.min(to)], centers[from.max(to)]);
    let span = hi - lo - 1;

    let label = lifeline_row(canvas, centers);
    let text_start = lo + 1 + span.saturating_sub(width(text)) / 2;
    canvas.put_str(label, text_start, text);

    let arrow = lifeline_row(canvas, centers);
    for col in lo + 1..hi {
        canvas.put(arrow, col, fill);
    }
    if head {
        if from < to {
            canvas.put(arrow, hi - 1, '▶');
        } else {
            canvas.put(arrow, lo + 1, '◀');
        }
    }
}

fn draw_note(canvas: &mut Canvas, centers: &[usize], placement: &NotePlacement, text: &str) {
    let body = format!("[ {text} ]");
    let body_width = width(&body);
    let start = match placement {
        NotePlacement::Over(first, second) => {
            let a = centers[*first];
            let b = second.map(|s| centers[s]).unwrap_or(a);
            let mid = (a.min(b) + a.max(b)) / 2;
            mid.saturating_sub(body_width / 2)
        }
        NotePlacement::LeftOf(p) => centers[*p].saturating_sub(body_width + 1),
        NotePlacement::RightOf(p) => centers[*p] + 2,
    };

    let row = lifeline_row(canvas, centers);
    canvas.put_str(row, start, &body);
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderer
// ─────────────────────────────────────────────────────────────────────────────

/// Draws sequence diagrams as box-drawing text
#[derive(Debug, Default, Clone, Copy)]
pub struct SequenceRenderer;

impl SequenceRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DiagramRenderer for SequenceRenderer {
    fn validate(&self, source: &str) -> Result<(), DiagramError> {
        parse(source).map(|_| ())
    }

    fn render(&self, id: &str, source: &str) -> Result<Fragment, DiagramError> {
        let diagram = parse(source)?;
        if diagram.participants.is_empty() {
            return Err(DiagramError::render("diagram has no participants"));
        }

        let centers = lifeline_columns(&diagram);
        let mut canvas = Canvas::default();

        draw_boxes(&mut canvas, &diagram, &centers, false);
        for event in &diagram.events {
            match event {
                Event::Message {
                    from,
                    to,
                    style,
                    head,
                    text,
                } => draw_message(&mut canvas, &centers, (*from, *to), *style, *head, text),
                Event::Note { placement, text } => {
                    draw_note(&mut canvas, &centers, placement, text)
                }
            }
        }
        lifeline_row(&mut canvas, &centers);
        draw_boxes(&mut canvas, &diagram, &centers, true);

        Ok(Fragment {
            id: id.to_string(),
            lines: canvas.into_lines(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "sequenceDiagram
    participant C as Client
    participant M as Mock server
    %% one round trip
    C->>M: GET /users
    M-->>C: 200
";

    #[test]
    fn test_parse_participants_and_messages() {
        let diagram = parse(SOURCE).unwrap();
        assert_eq!(diagram.participants.len(), 2);
        assert_eq!(diagram.participants[1].label, "Mock server");
        assert_eq!(diagram.events.len(), 2);
        assert_eq!(
            diagram.events[1],
            Event::Message {
                from: 1,
                to: 0,
                style: LineStyle::Dashed,
                head: true,
                text: "200".into(),
            }
        );
    }

    #[test]
    fn test_implicit_participants() {
        let diagram = parse("sequenceDiagram\nA->B: hi\nB-->C: there").unwrap();
        let ids: Vec<_> = diagram.participants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C"]);
        assert!(matches!(
            diagram.events[0],
            Event::Message {
                head: false,
                style: LineStyle::Solid,
                ..
            }
        ));
    }

    #[test]
    fn test_message_text_may_contain_arrows_and_colons() {
        let diagram = parse("sequenceDiagram\nA->>B: GET /a->b?t=1:2").unwrap();
        match &diagram.events[0] {
            Event::Message { text, .. } => assert_eq!(text, "GET /a->b?t=1:2"),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_notes() {
        let diagram =
            parse("sequenceDiagram\nparticipant A\nparticipant B\nNote over A,B: both\nnote right of B: r")
                .unwrap();
        assert_eq!(
            diagram.events[0],
            Event::Note {
                placement: NotePlacement::Over(0, Some(1)),
                text: "both".into()
            }
        );
        assert!(matches!(
            diagram.events[1],
            Event::Note {
                placement: NotePlacement::RightOf(1),
                ..
            }
        ));
    }

    #[test]
    fn test_missing_header_is_parse_error() {
        let err = parse("graph TD\nA-->B").unwrap_err();
        assert_eq!(
            err,
            DiagramError::parse(1, "expected `sequenceDiagram`, found `graph TD`")
        );
        assert!(matches!(parse("").unwrap_err(), DiagramError::Parse { .. }));
    }

    #[test]
    fn test_unknown_statement_reports_line() {
        let err = parse("sequenceDiagram\nA->>B: ok\nthis is not valid").unwrap_err();
        assert!(matches!(err, DiagramError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_render_draws_boxes_and_arrows() {
        let fragment = SequenceRenderer.render("seq", SOURCE).unwrap();
        assert_eq!(fragment.id, "seq");

        let text = fragment.lines.join("\n");
        assert!(text.contains("│ Client │"));
        assert!(text.contains("│ Mock server │"));
        assert!(text.contains("GET /users"));
        assert!(text.contains('▶'));
        assert!(text.contains('◀'));
        assert!(text.contains('╌'));
        // Header and footer boxes
        assert_eq!(text.matches("│ Client │").count(), 2);
    }

    #[test]
    fn test_render_labels_fit_between_lifelines() {
        let source = "sequenceDiagram\nA->>B: a rather long message label";
        let fragment = SequenceRenderer.render("x", source).unwrap();
        let label_line = fragment
            .lines
            .iter()
            .find(|l| l.contains("a rather long message label"))
            .unwrap();
        // Both lifelines are still visible on the label row
        assert_eq!(label_line.matches('│').count(), 2);
    }

    #[test]
    fn test_render_self_message() {
        let fragment = SequenceRenderer
            .render("x", "sequenceDiagram\nA->>A: loop")
            .unwrap();
        let text = fragment.lines.join("\n");
        assert!(text.contains("───┐"));
        assert!(text.contains("◀──┘"));
    }

    #[test]
    fn test_render_without_participants_fails() {
        let err = SequenceRenderer.render("x", "sequenceDiagram\n").unwrap_err();
        assert!(matches!(err, DiagramError::Render { .. }));
    }

    #[test]
    fn test_lines_have_no_trailing_spaces() {
        let fragment = SequenceRenderer.render("x", SOURCE).unwrap();
        assert!(fragment.lines.iter().all(|l| !l.ends_with(' ')));
    }
}
