//! GS1 Application Identifier element strings.
//!
//! An element string is a run of `<AI><data>` fields. Fixed-length fields
//! (GTIN, expiry) need no terminator; variable-length fields (lot, serial)
//! end at a group separator, at the end of input, or where the next AI
//! starts. Scanners often drop the separator entirely, so the boundary has
//! to be inferred: the segmenter picks the split that recovers a GTIN, then
//! the one with the most fields, then the one that skips the fewest
//! characters, then the one that uses the most explicit separators, then the
//! one with the shortest earlier variable field.

use std::fmt;

/// ASCII 29, emitted for FNC1 between fields.
pub const GROUP_SEPARATOR: char = '\x1d';

/// Some handheld scanners render the group separator as the literal text
/// `029`. It is only treated as a separator when an AI follows.
const SCANNER_SEPARATOR: [char; 3] = ['0', '2', '9'];

/// The Application Identifiers this decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationIdentifier {
    /// AI 01.
    Gtin,
    /// AI 10.
    Lot,
    /// AI 17, `YYMMDD`.
    Expiration,
    /// AI 21.
    Serial,
}

/// Length rule for the data following an AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLength {
    /// Exactly this many digits.
    Fixed(usize),
    /// Up to the configured maximum of non-separator characters.
    Variable,
}

impl ApplicationIdentifier {
    pub const ALL: [ApplicationIdentifier; 4] = [
        ApplicationIdentifier::Gtin,
        ApplicationIdentifier::Lot,
        ApplicationIdentifier::Expiration,
        ApplicationIdentifier::Serial,
    ];

    /// The two-digit AI code.
    pub fn code(&self) -> &'static str {
        match self {
            ApplicationIdentifier::Gtin => "01",
            ApplicationIdentifier::Lot => "10",
            ApplicationIdentifier::Expiration => "17",
            ApplicationIdentifier::Serial => "21",
        }
    }

    /// Look up an AI by its two-digit code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ai| ai.code() == code)
    }

    fn from_chars(first: char, second: char) -> Option<Self> {
        match (first, second) {
            ('0', '1') => Some(ApplicationIdentifier::Gtin),
            ('1', '0') => Some(ApplicationIdentifier::Lot),
            ('1', '7') => Some(ApplicationIdentifier::Expiration),
            ('2', '1') => Some(ApplicationIdentifier::Serial),
            _ => None,
        }
    }

    pub fn length(&self) -> FieldLength {
        match self {
            ApplicationIdentifier::Gtin => FieldLength::Fixed(14),
            ApplicationIdentifier::Expiration => FieldLength::Fixed(6),
            ApplicationIdentifier::Lot | ApplicationIdentifier::Serial => FieldLength::Variable,
        }
    }

    fn bit(&self) -> usize {
        match self {
            ApplicationIdentifier::Gtin => 1,
            ApplicationIdentifier::Lot => 2,
            ApplicationIdentifier::Expiration => 4,
            ApplicationIdentifier::Serial => 8,
        }
    }
}

impl fmt::Display for ApplicationIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.code())
    }
}

/// One decoded `<AI><data>` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiField {
    pub ai: ApplicationIdentifier,
    pub value: String,
}

/// Fields recovered from one pass over the input, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub fields: Vec<AiField>,
    /// Characters passed over without belonging to any field or separator.
    pub skipped: usize,
}

impl Segmentation {
    /// Value of the given AI, if it was recovered.
    pub fn get(&self, ai: ApplicationIdentifier) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.ai == ai)
            .map(|f| f.value.as_str())
    }
}

/// How much of the input must be accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMode {
    /// Every character belongs to a field or a separator.
    Strict,
    /// Characters between fields may be skipped; fields themselves stay
    /// contiguous.
    Lenient,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    End,
    Separator(usize),
    Field(ApplicationIdentifier, usize),
    Skip(usize),
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    gtin: bool,
    fields: u8,
    skipped: usize,
    separators: usize,
    step: Step,
}

const END: Cell = Cell {
    gtin: false,
    fields: 0,
    skipped: 0,
    separators: 0,
    step: Step::End,
};

impl Cell {
    fn extend(next: Cell, step: Step) -> Cell {
        let mut cell = Cell { step, ..next };
        match step {
            Step::Field(ai, _) => {
                cell.fields += 1;
                cell.gtin |= ai == ApplicationIdentifier::Gtin;
            }
            Step::Separator(_) => cell.separators += 1,
            Step::Skip(count) => cell.skipped += count,
            Step::End => {}
        }
        cell
    }

    /// A GTIN first, then most fields, then fewest skipped characters, then
    /// most explicit separators. Ties keep the earlier candidate.
    fn beats(&self, other: &Cell) -> bool {
        (self.gtin, self.fields, other.skipped, self.separators)
            > (other.gtin, other.fields, self.skipped, other.separators)
    }
}

const MASKS: usize = 16;

/// Best continuations, stored only at anchors: positions where a field or a
/// separator can begin. Every other position can only be skipped (lenient)
/// or is a dead end (strict), so its cell is derived from the next anchor.
struct Table<'a> {
    chars: &'a [char],
    mode: SegmentMode,
    anchors: Vec<usize>,
    rows: Vec<[Option<Cell>; MASKS]>,
}

impl Table<'_> {
    /// Best way to account for `chars[pos..]` with the AIs in `mask` used.
    fn cell(&self, pos: usize, mask: usize) -> Option<Cell> {
        let n = self.chars.len();
        if pos >= n {
            return Some(END);
        }

        let i = self.anchors.partition_point(|&a| a < pos);
        if self.anchors.get(i) == Some(&pos) {
            return self.rows[i][mask];
        }

        match self.mode {
            SegmentMode::Strict => None,
            SegmentMode::Lenient => {
                let target = self.anchors.get(i).copied().unwrap_or(n);
                self.cell(target, mask)
                    .map(|next| Cell::extend(next, Step::Skip(target - pos)))
            }
        }
    }

    fn walk(&self) -> Segmentation {
        let mut segmentation = Segmentation::default();
        let mut pos = 0;
        let mut mask = 0;

        while let Some(cell) = self.cell(pos, mask) {
            match cell.step {
                Step::End => break,
                Step::Separator(width) => pos += width,
                Step::Skip(count) => {
                    segmentation.skipped += count;
                    pos += count;
                }
                Step::Field(ai, end) => {
                    segmentation.fields.push(AiField {
                        ai,
                        value: self.chars[pos + 2..end].iter().collect(),
                    });
                    mask |= ai.bit();
                    pos = end;
                }
            }
        }

        segmentation
    }
}

/// Splits element strings into AI fields.
#[derive(Debug, Clone)]
pub struct ElementStringSegmenter {
    max_variable_length: usize,
}

impl ElementStringSegmenter {
    pub fn new(max_variable_length: usize) -> Self {
        Self {
            max_variable_length: max_variable_length.max(1),
        }
    }

    /// Segment `text`, returning `None` when no field could be recovered (or,
    /// in strict mode, when some character is left unexplained).
    pub fn segment(&self, text: &str, mode: SegmentMode) -> Option<Segmentation> {
        let chars: Vec<char> = text.chars().collect();

        if mode == SegmentMode::Strict
            && chars.iter().any(|&c| c != GROUP_SEPARATOR && !is_data_char(c))
        {
            return None;
        }

        let table = self.build_table(&chars, mode);

        let root = table.cell(0, 0)?;
        if root.fields == 0 {
            return None;
        }

        Some(table.walk())
    }

    /// Bottom-up over the anchors, last to first, for every set of AIs
    /// already used.
    fn build_table<'a>(&self, chars: &'a [char], mode: SegmentMode) -> Table<'a> {
        let anchors: Vec<usize> = (0..chars.len()).filter(|&pos| is_anchor(chars, pos)).collect();
        let mut table = Table {
            chars,
            mode,
            rows: vec![[None; MASKS]; anchors.len()],
            anchors,
        };

        for i in (0..table.anchors.len()).rev() {
            let pos = table.anchors[i];
            let mut row = [None; MASKS];
            for (mask, slot) in row.iter_mut().enumerate() {
                *slot = self.best_at(&table, pos, mask);
            }
            table.rows[i] = row;
        }

        table
    }

    fn best_at(&self, table: &Table<'_>, pos: usize, mask: usize) -> Option<Cell> {
        let chars = table.chars;
        let n = chars.len();

        let mut best: Option<Cell> = None;
        let mut consider = |next: Option<Cell>, step: Step| {
            let Some(next) = next else { return };
            let candidate = Cell::extend(next, step);
            if best.is_none_or(|b| candidate.beats(&b)) {
                best = Some(candidate);
            }
        };

        if chars[pos] == GROUP_SEPARATOR {
            consider(table.cell(pos + 1, mask), Step::Separator(1));
        }
        if pos > 0 && is_scanner_separator(chars, pos) {
            consider(table.cell(pos + 3, mask), Step::Separator(3));
        }

        if let Some(ai) = ai_at(chars, pos).filter(|ai| mask & ai.bit() == 0) {
            let next_mask = mask | ai.bit();
            let data_start = pos + 2;
            match ai.length() {
                FieldLength::Fixed(len) => {
                    let end = data_start + len;
                    if end <= n && chars[data_start..end].iter().all(char::is_ascii_digit) {
                        consider(table.cell(end, next_mask), Step::Field(ai, end));
                    }
                }
                FieldLength::Variable => {
                    let limit = (data_start + self.max_variable_length).min(n);
                    for end in data_start + 1..=limit {
                        if !is_data_char(chars[end - 1]) {
                            break;
                        }
                        consider(table.cell(end, next_mask), Step::Field(ai, end));
                    }
                }
            }
        }

        if table.mode == SegmentMode::Lenient {
            consider(table.cell(pos + 1, mask), Step::Skip(1));
        }

        best
    }
}

impl Default for ElementStringSegmenter {
    fn default() -> Self {
        Self::new(20)
    }
}

fn is_anchor(chars: &[char], pos: usize) -> bool {
    chars[pos] == GROUP_SEPARATOR
        || ai_at(chars, pos).is_some()
        || (pos > 0 && is_scanner_separator(chars, pos))
}

fn ai_at(chars: &[char], pos: usize) -> Option<ApplicationIdentifier> {
    match chars.get(pos..pos + 2) {
        Some([first, second]) => ApplicationIdentifier::from_chars(*first, *second),
        _ => None,
    }
}

fn is_scanner_separator(chars: &[char], pos: usize) -> bool {
    chars.get(pos..pos + 3) == Some(&SCANNER_SEPARATOR[..]) && ai_at(chars, pos + 3).is_some()
}

/// Characters allowed inside a variable-length field.
fn is_data_char(c: char) -> bool {
    !c.is_whitespace() && !c.is_control() && c != ',' && c != '&'
}
