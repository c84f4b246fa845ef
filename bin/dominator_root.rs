use dominator_analyzer::analysis::root::{first_node, select_root, source_nodes};
use dominator_analyzer::dataset::read_edge_list;
use dominator_analyzer::AdjacencyGraph;
use std::env;

fn main() {
    tracing_subscriber::fmt().without_time().with_writer(std::io::stderr).init();

    let dataset = env::var("DOMINATOR_DATASET").expect("DOMINATOR_DATASET not set");
    let graph: AdjacencyGraph<u64> = match read_edge_list(&dataset) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    println!("\n--- Dataset ---");
    println!("Nodes: {}", graph.node_count());
    println!("Edges: {}", graph.edge_count());

    let sources = source_nodes(&graph);
    if !sources.is_empty() {
        println!("\n--- Sources ---");
        for node in sources.iter() {
            println!("- {}: out-degree {}", node, graph.out_degree(node));
        }
    }
    println!("--------------");
    match select_root(&graph) {
        Some(root) => println!("source strategy picks {}", root),
        None => println!("source strategy finds no node without predecessors"),
    }
    if let Some(root) = first_node(&graph) {
        println!("first strategy picks {}", root);
    }
}
