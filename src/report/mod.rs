//! Sheet model for the report sink: column identity, row data, and the
//! per-sheet record subsets. The sink applies all visual policy; this layer
//! only says which column holds the tier value and which holds the
//! mental-health-relevance flag so conditional fills need no re-derivation.

pub mod xlsx;

use crate::pipeline::aggregate::Partitions;
use crate::pipeline::classify::EnrichedRecord;

/// A report column: header text plus display width in character units.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub width: f64,
}

const fn col(header: &'static str, width: f64) -> Column {
    Column { header, width }
}

// The 16 record fields plus the four base classification columns.
const BASE_COLUMNS: &[Column] = &[
    col("Provider Name", 45.0),
    col("City", 18.0),
    col("State", 6.0),
    col("Country", 6.0),
    col("Website", 30.0),
    col("Accreditation Type", 25.0),
    col("Accreditation Status", 30.0),
    col("Joint Providership", 10.0),
    col("Activities/Year", 12.0),
    col("Contact Name", 25.0),
    col("Contact Phone", 18.0),
    col("Address", 40.0),
    col("ZIP", 12.0),
    col("Activity Formats", 35.0),
    col("Accredited By", 30.0),
    col("Provider ID", 10.0),
    col("Priority Tier", 10.0),
    col("Spanish Market", 14.0),
    col("High Volume", 11.0),
    col("Commendation Status", 18.0),
];

// Mental-health enrichment columns, inserted before Notes when enabled.
const MH_COLUMNS: &[Column] = &[
    col("MH Relevance", 13.0),
    col("Specialty Category", 28.0),
    col("Org Type", 22.0),
    col("Global Footprint", 15.0),
    col("Pitch Angle", 45.0),
];

const NOTES_COLUMN: Column = col("Notes", 20.0);

/// A single cell value; the sink decides the rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(u32),
}

/// Fixed column layout, identical across all sheets of a report.
#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub columns: Vec<Column>,
    /// Zero-based index of the Priority Tier column (conditional fill).
    pub tier_col: u16,
    /// Zero-based index of the MH Relevance column, when present
    /// (conditional highlight on "Yes").
    pub mh_col: Option<u16>,
    /// Zero-based index of the Activities/Year column (number format).
    pub activities_col: u16,
}

impl ReportLayout {
    pub fn new(include_mh_columns: bool) -> Self {
        let mut columns: Vec<Column> = BASE_COLUMNS.to_vec();
        let mh_col = if include_mh_columns {
            let idx = columns.len() as u16;
            columns.extend_from_slice(MH_COLUMNS);
            Some(idx)
        } else {
            None
        };
        columns.push(NOTES_COLUMN);

        Self {
            columns,
            tier_col: 16,
            mh_col,
            activities_col: 8,
        }
    }

    pub fn include_mh_columns(&self) -> bool {
        self.mh_col.is_some()
    }
}

fn yes_no(flag: bool) -> Cell {
    Cell::Text(if flag { "Yes" } else { "No" }.to_string())
}

/// Row data for one record in the fixed column order.
pub fn row_cells(r: &EnrichedRecord, include_mh_columns: bool) -> Vec<Cell> {
    let rec = &r.record;
    let enr = &r.enrichment;
    let mut cells = vec![
        Cell::Text(rec.provider_name.clone()),
        Cell::Text(rec.city.clone()),
        Cell::Text(rec.state.clone()),
        Cell::Text(rec.country.clone()),
        Cell::Text(rec.website.clone()),
        Cell::Text(rec.accreditation_type.clone()),
        Cell::Text(rec.accreditation_status.clone()),
        Cell::Text(rec.joint_providership.clone()),
        Cell::Int(rec.activities),
        Cell::Text(rec.contact_name.clone()),
        Cell::Text(rec.contact_phone.clone()),
        Cell::Text(rec.address.clone()),
        Cell::Text(rec.zip.clone()),
        Cell::Text(rec.activity_formats.clone()),
        Cell::Text(rec.accredited_by.clone()),
        Cell::Text(rec.provider_id.clone()),
        Cell::Int(enr.tier as u32),
        yes_no(enr.spanish),
        yes_no(enr.high_vol),
        yes_no(enr.commendation),
    ];
    if include_mh_columns {
        cells.push(yes_no(enr.mh_relevance()));
        cells.push(Cell::Text(enr.specialty_category()));
        cells.push(Cell::Text(enr.org_type.clone()));
        cells.push(yes_no(enr.global_footprint));
        cells.push(Cell::Text(enr.pitch_angle.clone()));
    }
    cells.push(Cell::Text(String::new())); // Notes, left for the reader
    cells
}

/// One sheet of the report: a name plus the records it renders.
#[derive(Debug)]
pub struct SheetSpec<'a> {
    pub name: &'static str,
    pub records: Vec<&'a EnrichedRecord>,
}

/// The five report sheets, in workbook order.
pub fn build_sheets<'a>(
    all: &'a [EnrichedRecord],
    parts: &Partitions<'a>,
) -> Vec<SheetSpec<'a>> {
    vec![
        SheetSpec {
            name: "All Providers",
            records: all.iter().collect(),
        },
        SheetSpec {
            name: "Tier 1 Targets",
            records: parts.tier1.clone(),
        },
        SheetSpec {
            name: "Mental Health Targets",
            records: parts.mh_relevant.clone(),
        },
        SheetSpec {
            name: "Spanish Market Focus",
            records: parts.spanish.clone(),
        },
        SheetSpec {
            name: "High Volume",
            records: parts.high_volume.clone(),
        },
    ]
}
