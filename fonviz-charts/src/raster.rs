use std::sync::OnceLock;

use resvg::{
    tiny_skia,
    usvg::{self, fontdb, Options, TreeParsing, TreeTextToPath},
};
use tracing::debug;

use crate::ChartError;

fn fonts() -> &'static fontdb::Database {
    static FONTS: OnceLock<fontdb::Database> = OnceLock::new();
    FONTS.get_or_init(|| {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_system_fonts();
        debug!("loaded {} system font faces", fontdb.len());
        fontdb
    })
}

/// Rasterizes an svg document of `size` pixels into png bytes.
pub fn rasterize_svg(svg: &str, size: (u32, u32)) -> Result<Vec<u8>, ChartError> {
    let opt = Options::default();
    let mut tree =
        usvg::Tree::from_str(svg, &opt).map_err(|e| ChartError::Rasterize(e.to_string()))?;
    tree.convert_text(fonts());
    let rtree = resvg::Tree::from_usvg(&tree);
    let mut pixmap = tiny_skia::Pixmap::new(size.0, size.1)
        .ok_or_else(|| ChartError::Rasterize(format!("bad image size {size:?}")))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    rtree.render(tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|e| ChartError::Rasterize(e.to_string()))
}
