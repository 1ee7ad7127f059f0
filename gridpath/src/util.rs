use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

use anyhow::Context;
use image::{DynamicImage, GenericImageView};
use serde::Deserialize;

use crate::{Coord, Graph};

/// Start and end of the route, as stored in the breaks file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Breaks {
    pub start: Coord,
    pub end: Coord,
}

/// Turn a thresholded maze image into a graph. Light pixels are free cells,
/// connected to their free left/right/up/down neighbors.
pub fn parse_img(img: &DynamicImage) -> Result<Graph, anyhow::Error> {
    let width = i32::try_from(img.width())?;
    let height = i32::try_from(img.height())?;

    let mut open = BTreeSet::new();

    for row in 0..height {
        for col in 0..width {
            let p = img.get_pixel(col as u32, row as u32);

            if p.0[0] >= 128 {
                open.insert(Coord::new(col, row));
            }
        }
    }

    Ok(connect_grid(&open))
}

/// Build a graph from a text drawing, one line per row. `X` and `#` are
/// walls, any other character is a free cell.
pub fn parse_ascii(text: &str) -> Graph {
    let open: BTreeSet<Coord> = text
        .lines()
        .enumerate()
        .flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .filter(|&(_, c)| !matches!(c, 'X' | '#'))
                .map(move |(col, _)| Coord::new(col as i32, row as i32))
        })
        .collect();

    connect_grid(&open)
}

fn connect_grid(open: &BTreeSet<Coord>) -> Graph {
    let mut graph = Graph::new();

    for &cell in open {
        graph.add_vertex(cell);

        // only look right and down, the other two directions were handled
        // by the cell on the other side
        for next in [Coord::new(cell.x + 1, cell.y), Coord::new(cell.x, cell.y + 1)] {
            if open.contains(&next) {
                graph.add_edge(cell, next);
            }
        }
    }

    graph
}

pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph, anyhow::Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph file {}", path.display()))?;
    let adjacency: BTreeMap<Coord, Vec<Coord>> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse graph file {}", path.display()))?;

    Ok(Graph::from_adjacency(&adjacency))
}

pub fn save_graph(path: impl AsRef<Path>, graph: &Graph) -> Result<(), anyhow::Error> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(&graph.to_adjacency())?;
    fs::write(path, text).with_context(|| format!("failed to write graph file {}", path.display()))
}

pub fn load_breaks(path: impl AsRef<Path>) -> Result<Breaks, anyhow::Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read breaks file {}", path.display()))?;

    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse breaks file {}", path.display()))
}

/// Space separated vertex labels, empty for an empty path
pub fn format_path(path: &[Coord]) -> String {
    path.iter()
        .map(Coord::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn write_path(path: impl AsRef<Path>, route: &[Coord]) -> Result<(), anyhow::Error> {
    let path = path.as_ref();
    fs::write(path, format_path(route))
        .with_context(|| format!("failed to write path file {}", path.display()))
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use image::{GrayImage, Luma};

    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gridpath-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_parse_ascii() {
        let graph = parse_ascii(
            "..X\n\
             #..",
        );

        assert_eq!(graph.len(), 4);
        assert!(!graph.contains(Coord::new(2, 0)));
        assert!(!graph.contains(Coord::new(0, 1)));
        assert_eq!(graph.neighbors(Coord::new(0, 0)), &[Coord::new(1, 0)]);
        assert_eq!(
            graph.neighbors(Coord::new(1, 1)),
            &[Coord::new(1, 0), Coord::new(2, 1)]
        );
    }

    #[test]
    fn test_parse_img() {
        // dark column in the middle of a 3x2 image
        let img = GrayImage::from_fn(3, 2, |x, _| if x == 1 { Luma([20]) } else { Luma([230]) });
        let graph = parse_img(&DynamicImage::ImageLuma8(img)).unwrap();

        assert_eq!(graph.len(), 4);
        assert!(!graph.contains(Coord::new(1, 0)));
        assert_eq!(graph.neighbors(Coord::new(0, 0)), &[Coord::new(0, 1)]);
        assert_eq!(graph.neighbors(Coord::new(2, 1)), &[Coord::new(2, 0)]);
    }

    #[test]
    fn test_load_graph() {
        let file = scratch_file("graph.json");
        fs::write(
            &file,
            r#"{
                "(0, 0)": ["(1, 0)", "(0, 1)"],
                "(1, 0)": ["(0, 0)"],
                "(0, 1)": ["(0, 0)"],
                "(5, 5)": []
            }"#,
        )
        .unwrap();

        let graph = load_graph(&file).unwrap();

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.neighbors(Coord::new(0, 0)).len(), 2);
        assert_eq!(graph.neighbors(Coord::new(1, 0)), &[Coord::new(0, 0)]);
        assert!(graph.neighbors(Coord::new(5, 5)).is_empty());

        let copy = scratch_file("graph-copy.json");
        save_graph(&copy, &graph).unwrap();
        assert_eq!(load_graph(&copy).unwrap().to_adjacency(), graph.to_adjacency());
    }

    #[test]
    fn test_load_graph_malformed_label() {
        let file = scratch_file("bad-graph.json");
        fs::write(&file, r#"{ "(0, 0)": ["1, 0"] }"#).unwrap();

        assert!(load_graph(&file).is_err());
        assert!(load_graph(scratch_file("missing.json")).is_err());
    }

    #[test]
    fn test_load_breaks() {
        let file = scratch_file("breaks.json");
        fs::write(&file, r#"{ "start": "(1, 2)", "end": "(10, 0)" }"#).unwrap();

        assert_eq!(
            load_breaks(&file).unwrap(),
            Breaks {
                start: Coord::new(1, 2),
                end: Coord::new(10, 0),
            }
        );

        fs::write(&file, r#"{ "start": "1, 2", "end": "(10, 0)" }"#).unwrap();
        assert!(load_breaks(&file).is_err());
    }

    #[test]
    fn test_write_path() {
        let file = scratch_file("path.txt");

        write_path(&file, &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)]).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "(0, 0) (0, 1) (1, 1)");

        write_path(&file, &[]).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "");
    }
}
