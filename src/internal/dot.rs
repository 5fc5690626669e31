//! The `dot` module contains the conversion of automata and partition trees to the graphviz dot
//! format. It is used for debugging and to visualize the steps of the algorithms.

use std::io::Write;

use dot_writer::{Attributes, Color, DotWriter, RankDirection, Shape};

use crate::{Automaton, PartitionTree, StateID};

fn node_name(state: StateID) -> String {
    format!("node_{}", state.as_usize())
}

/// Render an automaton to the graphviz dot format.
/// An arrow from an invisible node points to the initial state, which is drawn blue. Accepting
/// states have a double border and are drawn red unless they are initial.
pub fn render_automaton<W: Write>(automaton: &Automaton, label: &str, output: &mut W) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    for state in automaton.states() {
        let mut node = digraph.node_named(node_name(state.id()));
        match state.label() {
            Some(label) => node.set_label(&format!("{}\n{{{}}}", state.name(), label)),
            None => node.set_label(state.name()),
        };
        node.set_shape(Shape::Circle);
        let accepting = automaton.is_final(state.id());
        if accepting {
            node.set("peripheries", "2", false);
        }
        if automaton.initial_state() == Some(state.id()) {
            node.set_color(Color::Blue).set_pen_width(3.0);
        } else if accepting {
            node.set_color(Color::Red).set_pen_width(3.0);
        }
    }
    if let Some(initial_state) = automaton.initial_state() {
        digraph
            .node_named("start")
            .set_shape(Shape::None)
            .set_label("");
        digraph.edge("start", node_name(initial_state));
    }
    for transition in automaton.transitions() {
        digraph
            .edge(node_name(transition.from()), node_name(transition.to()))
            .attributes()
            .set_label(&transition.label().to_string().escape_default().to_string());
    }
}

/// Render the partition tree of a minimization to the graphviz dot format.
/// The edges from a split group to its sub-groups are labeled with the splitting symbol.
pub fn render_partition_tree<W: Write>(tree: &PartitionTree, label: &str, output: &mut W) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph.set_label(label);
    let mut work_list = vec![tree.root()];
    while let Some(id) = work_list.pop() {
        let Some(group) = tree.group(id) else {
            continue;
        };
        let states = group
            .states()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",");
        {
            let mut node = digraph.node_named(format!("group_{}", id.as_usize()));
            node.set_label(&format!("{{{}}}", states));
            if group.is_leaf() {
                node.set_color(Color::Blue);
            }
        }
        for child in group.children() {
            digraph
                .edge(
                    format!("group_{}", id.as_usize()),
                    format!("group_{}", child.as_usize()),
                )
                .attributes()
                .set_label(group.witness().unwrap_or_default());
            work_list.push(*child);
        }
    }
}
