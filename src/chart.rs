use std::collections::BTreeMap;
use std::path::Path;

use image::{Rgb, RgbImage};

use crate::color::{hue_wheel, AXIS, BACKGROUND, GRID};
use crate::config::ChartConfig;
use crate::data::model::RecordTable;
use crate::data::schema::SENIORITY;
use crate::error::{PipelineError, Result};
use crate::transform::Seniority;

const MARGIN: u32 = 40;
const GRID_LINES: u32 = 10;

/// Count candidates per seniority level. Every level is present, zero or not.
pub fn seniority_counts(table: &RecordTable) -> Result<BTreeMap<Seniority, usize>> {
    let mut counts: BTreeMap<Seniority, usize> =
        Seniority::ALL.into_iter().map(|s| (s, 0)).collect();
    for (value, n) in table.value_counts("chart", SENIORITY)? {
        let level = value
            .as_i64()
            .and_then(Seniority::from_code)
            .ok_or_else(|| PipelineError::NonNumeric {
                column: SENIORITY.to_string(),
                row: 0,
                value: value.to_string(),
            })?;
        counts.insert(level, n);
    }
    Ok(counts)
}

fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, colour: Rgb<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, colour);
        }
    }
}

/// Draw one bar per level (junior, middle, senior), heights scaled to the
/// largest count, over horizontal grid lines.
pub fn render_bar_chart(counts: &BTreeMap<Seniority, usize>, width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    let plot_w = width.saturating_sub(2 * MARGIN);
    let plot_h = height.saturating_sub(2 * MARGIN);
    if plot_w == 0 || plot_h == 0 || counts.is_empty() {
        return img;
    }
    let baseline = MARGIN + plot_h;

    for i in 0..=GRID_LINES {
        let y = MARGIN + plot_h * i / GRID_LINES;
        fill_rect(&mut img, MARGIN, y, MARGIN + plot_w, y + 1, GRID);
    }

    let max = counts.values().copied().max().unwrap_or(0).max(1) as u64;
    let slot = plot_w / counts.len() as u32;
    let bar_w = slot * 3 / 5;
    let colours = hue_wheel(counts.len());

    for (i, (&count, colour)) in counts.values().zip(colours).enumerate() {
        let bar_h = (plot_h as u64 * count as u64 / max) as u32;
        let x0 = MARGIN + slot * i as u32 + (slot - bar_w) / 2;
        fill_rect(&mut img, x0, baseline - bar_h, x0 + bar_w, baseline, colour);
    }

    fill_rect(&mut img, MARGIN, baseline, MARGIN + plot_w, baseline + 2, AXIS);
    fill_rect(&mut img, MARGIN.saturating_sub(2), MARGIN, MARGIN, baseline + 2, AXIS);
    img
}

/// Render the seniority distribution of `table` and save it as PNG.
pub fn save_bar_chart(table: &RecordTable, dir: &Path, config: &ChartConfig) -> Result<()> {
    let counts = seniority_counts(table)?;
    for (level, n) in &counts {
        log::info!("{level:>6}: {n} resumes");
    }
    let img = render_bar_chart(&counts, config.width, config.height);
    std::fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
    let path = dir.join(&config.file_name);
    img.save(&path)?;
    log::info!("saved seniority chart to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table(levels: &[i64]) -> RecordTable {
        let mut t = RecordTable::new((0..levels.len()).map(|i| i.to_string()).collect());
        t.push_column(SENIORITY, levels.iter().map(|l| CellValue::Integer(*l)).collect())
            .unwrap();
        t
    }

    #[test]
    fn counts_include_empty_levels() {
        let counts = seniority_counts(&table(&[3, 3, 1])).unwrap();
        assert_eq!(counts[&Seniority::Junior], 1);
        assert_eq!(counts[&Seniority::Middle], 0);
        assert_eq!(counts[&Seniority::Senior], 2);
    }

    #[test]
    fn tallest_bar_reaches_the_top_of_the_plot() {
        let counts = seniority_counts(&table(&[3, 3, 1])).unwrap();
        let img = render_bar_chart(&counts, 340, 240);
        assert_eq!(img.dimensions(), (340, 240));

        let slot = (340 - 2 * MARGIN) / 3;
        let senior_centre = MARGIN + slot * 2 + slot / 2;
        let middle_centre = MARGIN + slot + slot / 2;
        let colours = hue_wheel(3);
        assert_eq!(*img.get_pixel(senior_centre, MARGIN + 1), colours[2]);
        assert_eq!(*img.get_pixel(middle_centre, 240 - MARGIN - 1), BACKGROUND);
    }

    #[test]
    fn writes_png() {
        let dir = tempfile::tempdir().unwrap();
        save_bar_chart(&table(&[1, 2, 2]), dir.path(), &ChartConfig::default()).unwrap();
        let img = image::open(dir.path().join("bar_chart.png")).unwrap();
        assert_eq!(img.width(), 800);
    }
}
