//! Excel rendering of the report sheets.
//!
//! Owns every visual decision: fonts, fills, borders, widths, frozen header
//! row, autofilter, and the conditional tier/MH fills driven by the column
//! indices the layout exposes.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::error::Result;
use super::{row_cells, Cell, ReportLayout, SheetSpec};

const HEADER_FILL: u32 = 0x2F5496;
const BORDER_COLOR: u32 = 0xD9D9D9;
// Green / amber / red fills for tiers 1-3.
const TIER_FILLS: [u32; 3] = [0xC6EFCE, 0xFFEB9C, 0xFFC7CE];
const MH_HIGHLIGHT_FILL: u32 = 0xFFF2CC;

struct SheetFormats {
    header: Format,
    data: Format,
    activities: Format,
    tier: [Format; 3],
    mh_yes: Format,
}

fn build_formats() -> SheetFormats {
    let bordered = Format::new()
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(BORDER_COLOR));

    let header = bordered
        .clone()
        .set_font_name("Arial")
        .set_font_size(11)
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();

    let data = bordered.set_font_name("Arial").set_font_size(10);

    let activities = data
        .clone()
        .set_align(FormatAlign::Right)
        .set_num_format("#,##0");

    let tier = TIER_FILLS.map(|fill| {
        data.clone()
            .set_background_color(Color::RGB(fill))
            .set_align(FormatAlign::Center)
    });

    let mh_yes = data.clone().set_background_color(Color::RGB(MH_HIGHLIGHT_FILL));

    SheetFormats {
        header,
        data,
        activities,
        tier,
        mh_yes,
    }
}

/// Render the report sheets into an xlsx workbook at `path`.
pub fn write_workbook(path: &Path, sheets: &[SheetSpec], layout: &ReportLayout) -> Result<()> {
    let formats = build_formats();
    let mut workbook = Workbook::new();

    for spec in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(spec.name)?;

        for (ci, column) in layout.columns.iter().enumerate() {
            let ci = ci as u16;
            worksheet.write_string_with_format(0, ci, column.header, &formats.header)?;
            worksheet.set_column_width(ci, column.width)?;
        }

        for (ri, record) in spec.records.iter().enumerate() {
            let row = (ri + 1) as u32;
            let cells = row_cells(record, layout.include_mh_columns());
            for (ci, cell) in cells.iter().enumerate() {
                let ci = ci as u16;
                match cell {
                    Cell::Int(n) if ci == layout.tier_col => {
                        let format = match n {
                            1..=3 => &formats.tier[(*n - 1) as usize],
                            _ => &formats.data,
                        };
                        worksheet.write_number_with_format(row, ci, *n as f64, format)?;
                    }
                    Cell::Int(n) if ci == layout.activities_col => {
                        worksheet.write_number_with_format(
                            row,
                            ci,
                            *n as f64,
                            &formats.activities,
                        )?;
                    }
                    Cell::Int(n) => {
                        worksheet.write_number_with_format(row, ci, *n as f64, &formats.data)?;
                    }
                    Cell::Text(s) if layout.mh_col == Some(ci) && s == "Yes" => {
                        worksheet.write_string_with_format(row, ci, s.as_str(), &formats.mh_yes)?;
                    }
                    Cell::Text(s) => {
                        worksheet.write_string_with_format(row, ci, s.as_str(), &formats.data)?;
                    }
                }
            }
        }

        let last_row = spec.records.len() as u32;
        let last_col = (layout.columns.len() - 1) as u16;
        worksheet.autofilter(0, 0, last_row, last_col)?;
        worksheet.set_freeze_panes(1, 0)?;
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::pipeline::{aggregate, Pipeline};
    use crate::report::build_sheets;

    #[test]
    fn test_write_workbook_to_disk() {
        let result = Pipeline::new(ReportConfig::default()).run_from_lines(
            "Acme Psych Center~Miami~FL~USA~acme.org~A~C~Y~120~Jane Doe~555-1212~1 Main St~33101~Workshop~Self~PID1\n\
             Quiet Provider~Nowhere~OH~USA~~S~A~N~5~~~~~~~PID2\n",
        );
        let parts = aggregate::partition(&result.records);
        let sheets = build_sheets(&result.records, &parts);
        assert_eq!(sheets.len(), 5);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        write_workbook(&path, &sheets, &ReportLayout::new(true)).unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
    }
}
