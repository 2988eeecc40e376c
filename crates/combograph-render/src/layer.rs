use crate::Result;
use crate::model::Drawing;
use combograph_graphlib::Graph;
use combograph_layout::PositionMap;

/// Draws one graph at fixed positions. `Ok(None)` means the layer has nothing to show.
pub trait Layer {
    fn draw(&self, graph: &Graph, pos: &PositionMap) -> Result<Option<Drawing>>;
}

impl<F> Layer for F
where
    F: Fn(&Graph, &PositionMap) -> Result<Option<Drawing>>,
{
    fn draw(&self, graph: &Graph, pos: &PositionMap) -> Result<Option<Drawing>> {
        self(graph, pos)
    }
}

impl Layer for Box<dyn Layer> {
    fn draw(&self, graph: &Graph, pos: &PositionMap) -> Result<Option<Drawing>> {
        self.as_ref().draw(graph, pos)
    }
}

/// Runs every layer in order and keeps the drawings that were produced.
pub fn apply_layers(
    layers: &[&dyn Layer],
    graph: &Graph,
    pos: &PositionMap,
) -> Result<Vec<Drawing>> {
    let mut out = Vec::with_capacity(layers.len());
    for layer in layers {
        if let Some(drawing) = layer.draw(graph, pos)? {
            out.push(drawing);
        }
    }
    Ok(out)
}
