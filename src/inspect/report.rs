//! Inspect report types and terminal formatting.
//!
//! This module provides structured inspection results that can be rendered
//! as text (Display) or serialized as JSON.

use serde::Serialize;
use std::fmt;

use crate::array::ElementType;
use crate::descriptor::AxisEntry;
use crate::display::{HorizontalDirection, VerticalDirection};

const INNER_WIDTH: usize = 57;

/// The result of inspecting one PDS4 image.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Path of the label that was read.
    pub label: String,
    /// What the label says about the stored array.
    pub array: ArraySection,
    /// How the array is oriented for display.
    pub display: DisplaySection,
    /// Statistics over the decoded values.
    pub values: ValueStats,
}

/// Stored array description.
#[derive(Clone, Debug, Serialize)]
pub struct ArraySection {
    pub identifier: String,
    /// Array class element name, e.g. `Array_2D_Image`.
    pub class: String,
    pub data_type: String,
    pub element_type: ElementType,
    /// Storage shape, outermost first.
    pub shape: Vec<usize>,
    pub axes: Vec<AxisEntry>,
    pub axis_index_order: String,
    pub byte_offset: u64,
    pub data_file: String,
}

/// Display orientation summary.
#[derive(Clone, Debug, Serialize)]
pub struct DisplaySection {
    pub horizontal_axis: String,
    pub horizontal_direction: HorizontalDirection,
    pub vertical_axis: String,
    pub vertical_direction: VerticalDirection,
    /// Storage position (0-based) of the horizontal axis.
    pub horizontal_position: usize,
    /// Storage position (0-based) of the vertical axis.
    pub vertical_position: usize,
    /// Rows of the oriented array (vertical extent).
    pub rows: usize,
    /// Columns of the oriented array (horizontal extent).
    pub columns: usize,
}

/// Value statistics. Min, max and mean only consider finite values.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValueStats {
    /// Total number of elements.
    pub count: usize,
    /// Elements that are not NaN or infinite.
    pub finite: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "╭─────────────────────────────────────────────────────────────╮")?;
        writeln!(f, "│                  PDS4 Image Inspection                      │")?;
        writeln!(f, "╰─────────────────────────────────────────────────────────────╯")?;
        writeln!(f, "  {}", self.label)?;
        writeln!(f)?;

        self.fmt_array(f)?;
        writeln!(f)?;
        self.fmt_display(f)?;
        writeln!(f)?;
        self.fmt_values(f)?;

        Ok(())
    }
}

impl InspectReport {
    fn fmt_array(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.array;

        fmt_header(f, &format!("Array '{}'", a.identifier))?;
        fmt_row(f, &format!("Class:       {}", a.class))?;
        fmt_row(f, &format!("Data type:   {} ({:?})", a.data_type, a.element_type))?;
        fmt_row(f, &format!("Shape:       {}", format_shape(&a.shape)))?;
        fmt_row(f, &format!("Layout:      {}", a.axis_index_order))?;
        fmt_row(f, &format!("Data file:   {}", a.data_file))?;
        fmt_row(f, &format!("Offset:      {} bytes", format_number(a.byte_offset as usize)))?;
        fmt_row(f, "")?;
        fmt_row(f, "Axes:")?;
        for axis in &a.axes {
            fmt_row(
                f,
                &format!(
                    "  {}. {:<20} {:>10} elements",
                    axis.sequence_number,
                    truncate(&axis.name, 20),
                    format_number(axis.element_count)
                ),
            )?;
        }
        fmt_footer(f)
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.display;

        fmt_header(f, "Display")?;
        fmt_row(
            f,
            &format!("Horizontal:  {:<20} {}", truncate(&d.horizontal_axis, 20), d.horizontal_direction),
        )?;
        fmt_row(
            f,
            &format!("Vertical:    {:<20} {}", truncate(&d.vertical_axis, 20), d.vertical_direction),
        )?;
        fmt_row(
            f,
            &format!(
                "Transposed:  {}",
                if d.vertical_position == 0 { "no" } else { "yes" }
            ),
        )?;
        fmt_row(
            f,
            &format!("Oriented:    {} rows x {} columns", format_number(d.rows), format_number(d.columns)),
        )?;
        fmt_footer(f)
    }

    fn fmt_values(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.values;

        fmt_header(f, "Values")?;
        fmt_row(
            f,
            &format!(
                "Finite:      {} of {} ({})",
                format_number(v.finite),
                format_number(v.count),
                fmt_percent(v.finite, v.count)
            ),
        )?;
        match (v.min, v.max, v.mean) {
            (Some(min), Some(max), Some(mean)) => {
                fmt_row(f, &format!("Min:         {min:.6e}"))?;
                fmt_row(f, &format!("Max:         {max:.6e}"))?;
                fmt_row(f, &format!("Mean:        {mean:.6e}"))?;
            }
            _ => fmt_row(f, "No finite values.")?,
        }
        fmt_footer(f)
    }
}

fn fmt_header(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let title = truncate(title, INNER_WIDTH - 2);
    let fill = INNER_WIDTH.saturating_sub(title.chars().count());
    writeln!(f, "┌─ {} {}┐", title, "─".repeat(fill))?;
    fmt_row(f, "")
}

fn fmt_row(f: &mut fmt::Formatter<'_>, content: &str) -> fmt::Result {
    writeln!(f, "│   {:<width$}│", truncate(content, INNER_WIDTH - 1), width = INNER_WIDTH - 1)
}

fn fmt_footer(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt_row(f, "")?;
    writeln!(f, "└{}┘", "─".repeat(INNER_WIDTH + 2))
}

fn format_shape(shape: &[usize]) -> String {
    shape
        .iter()
        .map(|dim| format_number(*dim))
        .collect::<Vec<_>>()
        .join(" x ")
}

/// Format a number with thousands separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a percentage, handling zero denominators.
fn fmt_percent(numerator: usize, denominator: usize) -> String {
    if denominator == 0 {
        "n/a".to_string()
    } else {
        format!("{:.1}%", (numerator as f64 / denominator as f64) * 100.0)
    }
}

/// Truncate to `max_len` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Sample", 20), "Sample");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn fmt_percent_handles_zero_denominator() {
        assert_eq!(fmt_percent(1, 0), "n/a");
        assert_eq!(fmt_percent(1, 4), "25.0%");
    }
}
