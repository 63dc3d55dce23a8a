use std::{fmt, str::FromStr};

/// How declarations are named and terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// `meshVert`, no terminator, every element followed by `, `
    Plain,
    /// `mesh_vert`, accepts `.glsl`, arrays end with an extra `0x00`
    Terminated,
}

impl Default for Style {
    fn default() -> Self {
        Style::Plain
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Style::Plain),
            "terminated" => Ok(Style::Terminated),
            other => Err(other.to_owned()),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Style::Plain => "plain",
            Style::Terminated => "terminated",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
    Compute,
    Generic,
}

impl Stage {
    pub fn from_extension(extension: &str, style: Style) -> Option<Stage> {
        let stage = match extension {
            "vert" => Stage::Vertex,
            "tesc" => Stage::TessControl,
            "tese" => Stage::TessEvaluation,
            "geom" => Stage::Geometry,
            "frag" => Stage::Fragment,
            "comp" => Stage::Compute,
            "glsl" if style == Style::Terminated => Stage::Generic,
            _ => return None,
        };

        Some(stage)
    }

    pub fn suffix(self, style: Style) -> &'static str {
        match (style, self) {
            (Style::Plain, Stage::Vertex) => "Vert",
            (Style::Plain, Stage::TessControl) => "Tesc",
            (Style::Plain, Stage::TessEvaluation) => "Tese",
            (Style::Plain, Stage::Geometry) => "Geom",
            (Style::Plain, Stage::Fragment) => "Frag",
            (Style::Plain, Stage::Compute) => "Comp",
            (Style::Plain, Stage::Generic) => "Glsl",
            (Style::Terminated, Stage::Vertex) => "_vert",
            (Style::Terminated, Stage::TessControl) => "_tesc",
            (Style::Terminated, Stage::TessEvaluation) => "_tese",
            (Style::Terminated, Stage::Geometry) => "_geom",
            (Style::Terminated, Stage::Fragment) => "_frag",
            (Style::Terminated, Stage::Compute) => "_comp",
            (Style::Terminated, Stage::Generic) => "_glsl",
        }
    }

    /// Name of the array emitted for `<stem>.<extension>`.
    pub fn identifier(self, stem: &str, style: Style) -> String {
        format!("{}{}", stem, self.suffix(style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_style_ignores_glsl() {
        assert_eq!(Stage::from_extension("glsl", Style::Plain), None);
        assert_eq!(
            Stage::from_extension("glsl", Style::Terminated),
            Some(Stage::Generic)
        );
    }

    #[test]
    fn unknown_extensions_are_not_stages() {
        for ext in &["txt", "spv", "VERT", ""] {
            assert_eq!(Stage::from_extension(ext, Style::Terminated), None);
        }
    }

    #[test]
    fn identifiers_follow_style() {
        let stage = Stage::from_extension("vert", Style::Plain).unwrap();
        assert_eq!(stage.identifier("tri", Style::Plain), "triVert");
        assert_eq!(stage.identifier("tri", Style::Terminated), "tri_vert");

        let stage = Stage::from_extension("tese", Style::Plain).unwrap();
        assert_eq!(stage.identifier("terrain", Style::Plain), "terrainTese");
    }

    #[test]
    fn style_parses_from_str() {
        assert_eq!("plain".parse::<Style>(), Ok(Style::Plain));
        assert_eq!("terminated".parse::<Style>(), Ok(Style::Terminated));
        assert_eq!("c".parse::<Style>(), Err("c".to_owned()));
        assert_eq!(Style::Terminated.to_string(), "terminated");
    }
}
