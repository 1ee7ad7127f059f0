use anyhow::Context;
use gridpath::{
    astar,
    config::Config,
    cost::path_length,
    theta,
    util::{load_breaks, load_graph, parse_img, save_graph, write_path},
    Coord, Graph,
};

fn build_graph(config: &Config) -> Result<Graph, anyhow::Error> {
    let Some(image_path) = &config.graph_image else {
        return load_graph(&config.file_graph);
    };

    let img = image::open(image_path)
        .with_context(|| format!("failed to open maze image {}", image_path.display()))?;
    let graph = parse_img(&img)?;

    save_graph(&config.file_graph, &graph)?;
    log::info!(
        "built graph from {} and saved it to {}",
        image_path.display(),
        config.file_graph.display()
    );

    Ok(graph)
}

fn report(name: &str, path: &[Coord]) {
    if path.is_empty() {
        log::warn!("{name}: no path found");
        return;
    }

    log::info!(
        "{name}: {} vertices, {} segments, length {:.3}",
        path.len(),
        path.len() - 1,
        path_length(path)
    );
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_owned());
    let config = Config::load(&config_path)?;

    let graph = build_graph(&config)?;
    let breaks = load_breaks(&config.file_breaks)?;
    log::info!(
        "graph has {} vertices, searching from {} to {}",
        graph.len(),
        breaks.start,
        breaks.end
    );

    let path = astar::find_path(&graph, breaks.start, breaks.end)?;
    report("A*", &path);
    write_path(&config.file_path, &path)?;

    let path = theta::find_path(&graph, breaks.start, breaks.end)?;
    report("Theta*", &path);
    write_path(&config.file_path_theta, &path)?;

    Ok(())
}
