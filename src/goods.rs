//! The itemised goods declared on the form, and how they are split across pages.

use serde::Serialize;

/// Header row repeated at the top of every goods table
pub const GOODS_HEADER: [&str; 6] = ["#", "Description", "Qty", "Weight (kg)", "Origin", "Value (AUD)"];

/// Goods rows that fit on the first page before the table continues on a second one
pub const FIRST_PAGE_ROWS: usize = 12;

const PLACEHOLDER: &str = "-";

/// One declared item. `index` is its 1-based position among the non-empty rows of
/// the submission, and never changes when the table is split across pages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GoodsRow {
    pub index: usize,
    pub description: String,
    pub quantity: String,
    pub weight: String,
    pub origin: String,
    pub value: String,
}

impl GoodsRow {
    /// Number the submitted rows, in order. Each field is trimmed and rows whose
    /// fields are all empty are dropped before numbering, so indices are dense and
    /// start at 1.
    ///
    /// The columns are parallel arrays from the submitted form. If they differ in
    /// length the extra entries of the longer ones are ignored.
    pub fn from_columns<S: AsRef<str>>(
        descriptions: &[S],
        quantities: &[S],
        weights: &[S],
        origins: &[S],
        values: &[S],
    ) -> Vec<GoodsRow> {
        let lengths = [
            descriptions.len(),
            quantities.len(),
            weights.len(),
            origins.len(),
            values.len(),
        ];
        let count = lengths.iter().copied().min().unwrap_or(0);
        let longest = lengths.iter().copied().max().unwrap_or(0);
        if longest != count {
            log::warn!(
                "goods columns have unequal lengths {lengths:?}; ignoring {} trailing entries",
                longest - count
            );
        }

        let mut rows: Vec<GoodsRow> = Vec::with_capacity(count);
        for i in 0..count {
            let mut row = GoodsRow {
                index: 0,
                description: descriptions[i].as_ref().trim().to_string(),
                quantity: quantities[i].as_ref().trim().to_string(),
                weight: weights[i].as_ref().trim().to_string(),
                origin: origins[i].as_ref().trim().to_string(),
                value: values[i].as_ref().trim().to_string(),
            };
            if row.is_blank() {
                continue;
            }
            row.index = rows.len() + 1;
            rows.push(row);
        }
        rows
    }

    pub fn is_blank(&self) -> bool {
        [
            &self.description,
            &self.quantity,
            &self.weight,
            &self.origin,
            &self.value,
        ]
        .iter()
        .all(|field| field.is_empty())
    }

    /// The row as table cells, in header order
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.index.to_string(),
            self.description.clone(),
            self.quantity.clone(),
            self.weight.clone(),
            self.origin.clone(),
            self.value.clone(),
        ]
    }
}

/// Split `rows` into the rows drawn on the first page and the rows that overflow
/// onto the second. The split is by count only, never by remaining page space.
pub fn paginate(rows: &[GoodsRow], first_page_capacity: usize) -> (&[GoodsRow], &[GoodsRow]) {
    rows.split_at(rows.len().min(first_page_capacity))
}

/// A goods table as drawn on one page: the fixed header and a run of rows
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoodsTable {
    pub rows: Vec<GoodsRow>,
}

impl GoodsTable {
    pub fn new(rows: &[GoodsRow]) -> GoodsTable {
        GoodsTable {
            rows: rows.to_vec(),
        }
    }

    /// True when there are no rows and a row of dashes will be drawn in their place
    pub fn is_placeholder(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header plus data rows, ready to draw. Never fewer than two rows.
    pub fn to_cells(&self) -> Vec<Vec<String>> {
        let mut cells: Vec<Vec<String>> = Vec::with_capacity(self.rows.len() + 1);
        cells.push(GOODS_HEADER.iter().map(|h| h.to_string()).collect());
        if self.rows.is_empty() {
            cells.push(vec![PLACEHOLDER.to_string(); GOODS_HEADER.len()]);
        } else {
            cells.extend(self.rows.iter().map(GoodsRow::cells));
        }
        cells
    }
}

/// The goods tables of a whole document: page one always, page two only if the
/// rows didn't fit. There is never a third.
#[derive(Clone, Debug, PartialEq)]
pub struct GoodsPages {
    pub first: GoodsTable,
    pub overflow: Option<GoodsTable>,
}

impl GoodsPages {
    pub fn split(rows: &[GoodsRow], first_page_capacity: usize) -> GoodsPages {
        let (first, overflow) = paginate(rows, first_page_capacity);
        GoodsPages {
            first: GoodsTable::new(first),
            overflow: (!overflow.is_empty()).then(|| GoodsTable::new(overflow)),
        }
    }

    pub fn page_count(&self) -> usize {
        if self.overflow.is_some() {
            2
        } else {
            1
        }
    }
}
