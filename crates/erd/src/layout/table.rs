//! Table box measurements.
//!
//! A table is drawn as a header row holding the entity name followed by one
//! row per field with three columns: key markers, field name and column
//! type. There is no font shaping here; glyph widths are estimated from the
//! font size, which is close enough for the sans-serif fonts diagrams use.

use erd_core::{
    geometry::{Insets, Size},
    schema::{Entity, Field},
};

/// Average advance of a glyph relative to the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Row height relative to the font size.
const LINE_HEIGHT_RATIO: f32 = 1.6;

/// Estimated rendered width of `text` at `font_size`.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * GLYPH_WIDTH_RATIO
}

/// Key markers shown in front of a field, e.g. `PK FK`.
pub fn field_markers(field: &Field) -> String {
    let mut markers = Vec::new();
    if field.is_primary_key() {
        markers.push("PK");
    }
    if field.foreign_key().is_some() {
        markers.push("FK");
    }
    if field.is_unique() {
        markers.push("UQ");
    }
    if field.is_indexed() {
        markers.push("IX");
    }
    markers.join(" ")
}

/// Column widths and row geometry of one table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableMetrics {
    row_height: f32,
    padding: Insets,
    column_gap: f32,
    header_width: f32,
    marker_width: f32,
    name_width: f32,
    type_width: f32,
    rows: usize,
}

impl TableMetrics {
    /// Measures `entity` rendered at `font_size`.
    pub fn measure(entity: &Entity, font_size: f32) -> Self {
        let widest = |texts: &mut dyn Iterator<Item = String>| {
            texts
                .map(|text| text_width(&text, font_size))
                .fold(0.0_f32, f32::max)
        };

        let fields = entity.fields();
        Self {
            row_height: font_size * LINE_HEIGHT_RATIO,
            padding: Insets::new(0.0, font_size * 0.8, 0.0, font_size * 0.8),
            column_gap: font_size,
            header_width: text_width(entity.name(), font_size),
            marker_width: widest(&mut fields.iter().map(field_markers)),
            name_width: widest(&mut fields.iter().map(|field| field.name().to_string())),
            type_width: widest(&mut fields.iter().map(|field| field.field_type().to_string())),
            rows: fields.len(),
        }
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Horizontal offset of the field name column from the left border.
    pub fn name_offset(&self) -> f32 {
        let markers = if self.marker_width > 0.0 {
            self.marker_width + self.column_gap
        } else {
            0.0
        };
        self.padding.left() + markers
    }

    /// Horizontal offset of the right edge of the type column.
    pub fn type_offset(&self) -> f32 {
        self.size().width() - self.padding.right()
    }

    /// Vertical offset of the top of field row `row`, counted below the header.
    pub fn row_offset(&self, row: usize) -> f32 {
        self.row_height() * (row + 1) as f32
    }

    pub fn size(&self) -> Size {
        let columns = self.name_offset() - self.padding.left()
            + self.name_width
            + self.column_gap
            + self.type_width;
        let width = columns.max(self.header_width) + self.padding.horizontal_sum();
        let height = self.row_height() * (self.rows + 1) as f32;
        Size::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use erd_core::schema::Field;
    use float_cmp::approx_eq;

    use super::*;

    fn entity() -> Entity {
        Entity::new("user")
            .with_field(Field::integer("id").primary_key())
            .with_field(Field::varchar("email").unique())
            .with_field(Field::varchar("firstname"))
    }

    #[test]
    fn test_text_width_scales_with_font() {
        assert!(approx_eq!(f32, text_width("abcd", 10.0), 24.0));
        assert!(approx_eq!(f32, text_width("", 10.0), 0.0));
        assert!(text_width("abcd", 20.0) > text_width("abcd", 10.0));
    }

    #[test]
    fn test_field_markers() {
        assert_eq!(field_markers(&Field::integer("id").primary_key()), "PK");
        assert_eq!(
            field_markers(&Field::integer("a").primary_key().references("user", "id")),
            "PK FK"
        );
        assert_eq!(field_markers(&Field::varchar("email").unique()), "UQ");
        assert_eq!(field_markers(&Field::varchar("username").indexed()), "IX");
        assert_eq!(field_markers(&Field::varchar("url")), "");
    }

    #[test]
    fn test_height_covers_header_and_rows() {
        let metrics = TableMetrics::measure(&entity(), 10.0);
        assert!(approx_eq!(f32, metrics.row_height(), 16.0));
        assert!(approx_eq!(f32, metrics.size().height(), 64.0));
        assert!(approx_eq!(f32, metrics.row_offset(0), 16.0));
        assert!(approx_eq!(f32, metrics.row_offset(2), 48.0));
    }

    #[test]
    fn test_columns_fit_inside_width() {
        let metrics = TableMetrics::measure(&entity(), 10.0);
        let size = metrics.size();

        let name_end = metrics.name_offset() + text_width("firstname", 10.0);
        let type_start = metrics.type_offset() - text_width("VARCHAR", 10.0);
        assert!(name_end < type_start);
        assert!(metrics.type_offset() < size.width());
    }

    #[test]
    fn test_long_entity_name_widens_table() {
        let narrow =
            TableMetrics::measure(&Entity::new("a").with_field(Field::integer("id")), 10.0);
        let wide = TableMetrics::measure(
            &Entity::new("a_rather_long_entity_name").with_field(Field::integer("id")),
            10.0,
        );
        assert!(wide.size().width() > narrow.size().width());
    }

    #[test]
    fn test_table_without_markers_has_no_marker_column() {
        let entity = Entity::new("tag").with_field(Field::varchar("label"));
        let metrics = TableMetrics::measure(&entity, 10.0);
        assert!(approx_eq!(f32, metrics.name_offset(), metrics.padding().left()));
    }
}
