//! SVG generation from simulation frames

use crate::simulation::{Frame, RegionFrame, TerritoryFrame};
use crate::stylesheet::Stylesheet;

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add CSS custom properties from a stylesheet
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let mut css = String::from(":root {\n");
        for (token, value) in &stylesheet.colors {
            css.push_str(&format!("    --{}: {};\n", token, value));
        }
        css.push_str("  }\n");
        let prefix = self.prefix();
        css.push_str(&format!(
            "  .{}label {{ fill: var(--label); font-family: var(--font-family); }}",
            prefix
        ));
        self.styles.push(css);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn num(&self, value: f64) -> String {
        format_number(value, self.config.precision)
    }

    /// Open a group translated to `(x, y)`
    pub fn start_group(&mut self, id: Option<&str>, classes: &[String], x: f64, y: f64) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };

        self.elements.push(format!(
            r#"{}<g{}{} transform="translate({},{})">"#,
            self.indent_str(),
            id_attr,
            class_attr,
            self.num(x),
            self.num(y)
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Add an invisible circular path for a label to follow
    pub fn add_ring(&mut self, id: &str, radius: f64) {
        self.elements.push(format!(
            r#"{}<path id="{}" d="{}" fill="none" stroke="none"/>"#,
            self.indent_str(),
            id,
            ring_path_d(&self.num(radius))
        ));
    }

    /// Add text centered on a ring path
    pub fn add_ring_label(&mut self, ring_id: &str, text: &str, font_size_em: f64) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r##"{}<text class="{}label" font-size="{}em" text-anchor="middle"><textPath href="#{}" startOffset="50%" dominant-baseline="middle">{}</textPath></text>"##,
            self.indent_str(),
            prefix,
            format_number(font_size_em, 3),
            ring_id,
            escape_xml(text)
        ));
    }

    /// Add a circle element
    pub fn add_circle(
        &mut self,
        id: Option<&str>,
        cx: f64,
        cy: f64,
        r: f64,
        classes: &[String],
        styles: &str,
    ) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };

        self.elements.push(format!(
            r#"{}<circle{}{} cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            id_attr,
            class_attr,
            self.num(cx),
            self.num(cy),
            self.num(r),
            styles
        ));
    }

    /// Build the final SVG string for a `width` x `height` container
    pub fn build(self, width: f64, height: f64) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = -padding;
        let vb_y = -padding;
        let vb_w = width + 2.0 * padding;
        let vb_h = height + 2.0 * padding;

        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            self.num(width),
            self.num(height),
            self.num(vb_x),
            self.num(vb_y),
            self.num(vb_w),
            self.num(vb_h)
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a frame to an SVG string with the default stylesheet
pub fn render_svg(frame: &Frame, config: &SvgConfig) -> String {
    render_svg_with_stylesheet(frame, config, &Stylesheet::default())
}

/// Render a frame to an SVG string with a custom stylesheet
pub fn render_svg_with_stylesheet(
    frame: &Frame,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);

    for (index, region) in frame.regions.iter().enumerate() {
        render_region(index, region, frame, stylesheet, &mut builder);
    }

    builder.build(frame.width, frame.height)
}

/// Render one region group: label ring, label, then its territories
fn render_region(
    index: usize,
    region: &RegionFrame,
    frame: &Frame,
    stylesheet: &Stylesheet,
    builder: &mut SvgBuilder,
) {
    let prefix = builder.prefix();
    let group_id = format!("{}region-{}", prefix, index);
    let ring_id = format!("{}-ring", group_id);

    builder.start_group(
        Some(&group_id),
        &[format!("{}region", prefix)],
        region.x,
        region.y,
    );
    builder.add_ring(&ring_id, region.label_radius);
    builder.add_ring_label(&ring_id, &region.label, region.font_size_em);

    for territory in frame.territories_of(region.node) {
        render_territory(territory, stylesheet, builder);
    }
    builder.end_group();
}

fn render_territory(territory: &TerritoryFrame, stylesheet: &Stylesheet, builder: &mut SvgBuilder) {
    let prefix = builder.prefix();
    let sign = if territory.is_positive {
        "positive"
    } else {
        "negative"
    };
    let classes = [
        format!("{}territory", prefix),
        format!("{}{}", prefix, sign),
    ];
    let (stroke, fill) = stylesheet.territory_colors(territory.is_positive);
    let styles = format!(r#" stroke="{}" fill="{}""#, escape_xml(&stroke), escape_xml(&fill));
    let id = format!("{}territory-{}", prefix, territory.node.0);

    builder.add_circle(
        Some(&id),
        territory.offset.x,
        territory.offset.y,
        territory.radius,
        &classes,
        &styles,
    );
}

/// Full circle of radius `r` starting at the bottom, so a label at 50% sits on top
fn ring_path_d(r: &str) -> String {
    format!(
        "M0,{r}A{r},{r},0,1,1,0,-{r}A{r},{r},0,1,1,0,{r}Z",
        r = r
    )
}

/// Round to `precision` decimals and drop trailing zeros
fn format_number(value: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, value);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
