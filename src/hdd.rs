//! Hierarchical Delta Debugging: lifts any flat [`Algorithm`] to operate on
//! the children of a parse tree, one grammar level at a time.

use std::fmt;

use fixedbitset::FixedBitSet;
use log::debug;

use crate::algorithm::{Algorithm, Oracle};
use crate::cache::{Cache, HashCache};
use crate::configuration::Configuration;
use crate::error::Result;
use crate::input::Input;
use crate::node::Node;
use crate::outcome::Outcome;

/// Produces a [`Node`] tree over an `Input`'s byte range.
///
/// Implementations are external collaborators (a tree-sitter grammar, a
/// Kaitai-struct definition, ...); `Hdd` depends only on this contract.
pub trait Parser {
    /// Parse `input` into a tree whose leaf byte ranges cover the input
    /// and whose internal ranges contain their children's ranges.
    fn parse(&self, input: &Input<u8>) -> Result<Node>;

    /// Whether `Hdd` should extend a removed node's byte range with
    /// trailing whitespace (see [`Tree::expand`]).
    fn expand_whitespace(&self) -> bool;

    /// A short, human-readable name for this parser, for reporting.
    fn name(&self) -> String;
}

/// An owned arena node: the same fields as [`Node`], minus `exists`
/// (tracked out-of-line in [`Tree::exists`]) and with `children` as arena
/// indices rather than owned subtrees.
#[derive(Clone, Debug)]
struct ArenaNode {
    name: String,
    start: usize,
    end: usize,
    depth: usize,
    children: Vec<usize>,
}

/// The arena-backed working copy of a parsed tree that `Hdd::run` mutates
/// over the course of a reduction.
///
/// Built from a [`Node`] tree via [`Tree::new`], which performs the
/// unit-chain collapse (a node with exactly one child is replaced by that
/// child) while recomputing depths. `exists` is a bitset parallel to
/// `nodes`, favoring an arena + indices over a mutable pointer graph.
#[derive(Clone, Debug)]
struct Tree {
    nodes: Vec<ArenaNode>,
    exists: FixedBitSet,
    root: usize,
    max_depth: usize,
    full: Configuration<u8>,
    expand_whitespace: bool,
}

impl Tree {
    fn new(root: &Node, full: Configuration<u8>, expand_whitespace: bool) -> Self {
        let mut nodes = Vec::new();
        let mut max_depth = 0;
        let root_idx = Self::collapse(&mut nodes, root, 0, &mut max_depth);
        let mut exists = FixedBitSet::with_capacity(nodes.len());
        for i in 0..nodes.len() {
            exists.insert(i);
        }
        Tree {
            nodes,
            exists,
            root: root_idx,
            max_depth,
            full,
            expand_whitespace,
        }
    }

    /// Collapse unit chains while building the arena: descend through any
    /// run of single-child nodes before recording this node, then recurse
    /// into (already-collapsed) children at `depth + 1`.
    fn collapse(nodes: &mut Vec<ArenaNode>, node: &Node, depth: usize, max_depth: &mut usize) -> usize {
        let mut node = node;
        while node.children.len() == 1 {
            node = &node.children[0];
        }

        *max_depth = (*max_depth).max(depth);

        let children: Vec<usize> = node
            .children
            .iter()
            .map(|child| Self::collapse(nodes, child, depth + 1, max_depth))
            .collect();

        nodes.push(ArenaNode {
            name: node.name.clone(),
            start: node.start,
            end: node.end,
            depth,
            children,
        });
        nodes.len() - 1
    }

    /// Up to 3 trailing bytes of whitespace immediately after `end`, or an
    /// empty configuration. A growing-window scan: returns at the *first*
    /// `i` for which `[end, i)` is entirely whitespace, which in practice
    /// means "one byte if `input[end]` is whitespace, else none".
    fn expand(&self, end: usize) -> Configuration<u8> {
        if end >= self.full.len() {
            return Configuration::empty(self.full.input());
        }
        let limit = (end + 4).min(self.full.len() + 1);
        for i in (end + 1)..limit {
            let candidate = self.full.slice(end..i);
            if candidate.data().iter().all(u8::is_ascii_whitespace) {
                return candidate;
            }
        }
        Configuration::empty(self.full.input())
    }

    /// The deepest depth any node reached after the unit-chain collapse.
    fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn nodes_at_level(&self, level: usize) -> Vec<usize> {
        let mut nodes = vec![self.root];
        let mut depth = 0;
        while depth < level {
            let mut next = Vec::new();
            for &n in &nodes {
                if !self.exists.contains(n) {
                    continue;
                }
                for &c in &self.nodes[n].children {
                    if self.exists.contains(c) {
                        next.push(c);
                    }
                }
            }
            nodes = next;
            depth += 1;
        }
        nodes
    }

    /// The per-child subset configurations of an existing node, in child
    /// order, skipping non-existing children.
    fn subsets(&self, node: usize) -> Vec<Configuration<u8>> {
        let mut out = Vec::new();
        for &child in &self.nodes[node].children {
            if !self.exists.contains(child) {
                continue;
            }
            let c = &self.nodes[child];
            let mut config = self.full.slice(c.start..c.end);
            if self.expand_whitespace {
                config = config
                    .concat([&self.expand(c.end)])
                    .expect("config and its own expansion share an input");
            }
            out.push(config);
        }
        out
    }

    /// Mark every existing child of `node` whose position among that
    /// node's existing children (in order) is absent from `surviving`'s
    /// indices as no longer existing.
    fn prune(&mut self, node: usize, surviving: &Configuration<Configuration<u8>>) {
        let existing_children: Vec<usize> = self.nodes[node]
            .children
            .iter()
            .copied()
            .filter(|&c| self.exists.contains(c))
            .collect();
        let keep = surviving.indices();
        for (pos, &child) in existing_children.iter().enumerate() {
            if keep.binary_search(&pos).is_err() {
                self.exists.set(child, false);
            }
        }
    }

    fn unparse(&self, node: usize) -> Configuration<u8> {
        if !self.exists.contains(node) {
            return Configuration::empty(self.full.input());
        }

        let n = &self.nodes[node];
        if n.children.is_empty() {
            let mut config = self.full.slice(n.start..n.end);
            if self.expand_whitespace {
                config = config
                    .concat([&self.expand(n.end)])
                    .expect("config and its own expansion share an input");
            }
            return config;
        }

        let mut config = Configuration::empty(self.full.input());
        for &child in &n.children {
            if self.exists.contains(child) {
                config = config
                    .concat([&self.unparse(child)])
                    .expect("children of one tree share an input");
            }
        }
        config
    }
}

/// Hierarchical Delta Debugging: parses the input into a [`Node`] tree via
/// `P`, then repeatedly lifts inner algorithm `A` to decide, level by
/// level, which children of each surviving node are still necessary.
///
/// Reduces only at grammar-node boundaries, so the result stays
/// syntactically well-formed with respect to `P`'s grammar; does not by
/// itself guarantee 1-minimality (that's a property of the inner
/// algorithm, if it has one).
pub struct Hdd<P, A> {
    parser: P,
    algorithm: A,
}

impl<P, A> Hdd<P, A> {
    /// Lift `algorithm` to the grammar `parser` produces.
    pub fn new(parser: P, algorithm: A) -> Self {
        Hdd { parser, algorithm }
    }
}

impl<P, A> fmt::Debug for Hdd<P, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Hdd").finish()
    }
}

impl<P, A> Algorithm<u8> for Hdd<P, A>
where
    P: Parser,
    A: Algorithm<Configuration<u8>>,
{
    fn name(&self) -> String {
        format!(
            "HDD with {} using {}",
            self.algorithm.name(),
            self.parser.name()
        )
    }

    fn run(
        &self,
        input: &Input<u8>,
        oracle: &mut Oracle<u8>,
        // HDD never tests a `Configuration<u8>` directly -- every oracle
        // call goes through the lifted, per-node meta configuration below
        // -- so a caller-supplied `Cache<u8>` has no entries HDD could
        // ever consult. The cache HDD actually needs is keyed on
        // `Configuration<Configuration<u8>>` (subset-index identities that
        // are only meaningful within one node), so it's kept internally
        // and cleared before every node rather than threading an
        // incompatible key type through the `Algorithm<u8>` contract.
        _cache: Option<&mut dyn Cache<u8>>,
    ) -> Result<Configuration<u8>> {
        debug!("starting HDD algorithm");

        let root = self.parser.parse(input)?;
        let full = Configuration::from_input(input);
        let mut tree = Tree::new(&root, full, self.parser.expand_whitespace());
        debug!("parsed tree has max depth {}", tree.max_depth());
        let mut meta_cache = HashCache::<Configuration<u8>>::new();

        let mut level = 0;
        loop {
            let nodes = tree.nodes_at_level(level);
            if nodes.is_empty() {
                break;
            }

            for node in nodes {
                let subsets = tree.subsets(node);
                if subsets.len() <= 1 {
                    continue;
                }

                meta_cache.clear();

                let subset_count = subsets.len();
                let meta_input = Input::new(subsets);
                let mut lifted = |config: &Configuration<Configuration<u8>>| -> Result<Outcome> {
                    let mut flattened = Configuration::empty(input);
                    for subset in config.data() {
                        flattened = flattened.union(&subset)?;
                    }
                    oracle(&flattened)
                };

                let surviving =
                    self.algorithm
                        .run(&meta_input, &mut lifted, Some(&mut meta_cache))?;
                debug!(
                    "testing node {:?} at level {level} with {subset_count} subsets => {} survive",
                    tree.nodes[node].name,
                    surviving.len()
                );
                tree.prune(node, &surviving);
            }

            level += 1;
        }

        let result = tree.unparse(tree.root);
        debug!("HDD algorithm completed with {} elements", result.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::DdMin;

    /// Splits `\n`-separated lines into one leaf child per line (the
    /// newline itself is left for whitespace expansion to pick up), in a
    /// single flat root -- stands in for a real tree-sitter/Kaitai-struct
    /// parser in tests.
    struct LineParser;

    impl Parser for LineParser {
        fn parse(&self, input: &Input<u8>) -> Result<Node> {
            let data = input.as_slice();
            let mut root = Node::new("root", 0, data.len(), 0);
            let mut start = 0;
            for (i, &byte) in data.iter().enumerate() {
                if byte == b'\n' {
                    root.children.push(Node::new("line", start, i, 1));
                    start = i + 1;
                }
            }
            if start < data.len() {
                root.children.push(Node::new("line", start, data.len(), 1));
            }
            Ok(root)
        }

        fn expand_whitespace(&self) -> bool {
            true
        }

        fn name(&self) -> String {
            "LineParser".to_string()
        }
    }

    #[test]
    fn reduces_to_the_line_containing_the_marker() {
        let source = b"alpha\nbeta\nMARKER\ngamma\ndelta\n".to_vec();
        let input = Input::new(source);
        let mut oracle = |c: &Configuration<u8>| {
            let data = c.data();
            let text = String::from_utf8_lossy(&data);
            Ok(if text.contains("MARKER") {
                Outcome::Fail
            } else {
                Outcome::Pass
            })
        };

        let hdd = Hdd::new(LineParser, DdMin::new());
        let result = hdd.run(&input, &mut oracle, None).unwrap();
        let rendered = String::from_utf8(result.data()).unwrap();
        assert_eq!(rendered, "MARKER\n");
    }

    #[test]
    fn unit_chain_collapse_elides_single_child_spines() {
        let mut root = Node::new("root", 0, 10, 0);
        let mut wrapper = Node::new("wrapper", 0, 10, 1);
        let mut inner = Node::new("inner", 0, 10, 2);
        inner.children.push(Node::new("leaf-a", 0, 5, 3));
        inner.children.push(Node::new("leaf-b", 5, 10, 3));
        wrapper.children.push(inner);
        root.children.push(wrapper);

        let input = Input::new(vec![0u8; 10]);
        let full = Configuration::from_input(&input);
        let tree = Tree::new(&root, full, false);

        assert_eq!(tree.nodes[tree.root].name, "inner");
        assert_eq!(tree.nodes[tree.root].depth, 0);
        assert_eq!(tree.nodes[tree.root].children.len(), 2);
        assert!(tree.nodes.iter().all(|n| n.children.len() != 1));
    }

    #[test]
    fn prune_marks_non_surviving_children_absent() {
        let mut root = Node::new("root", 0, 6, 0);
        root.children.push(Node::new("a", 0, 2, 1));
        root.children.push(Node::new("b", 2, 4, 1));
        root.children.push(Node::new("c", 4, 6, 1));

        let input = Input::new(vec![0u8; 6]);
        let full = Configuration::from_input(&input);
        let mut tree = Tree::new(&root, full, false);

        let meta_input = Input::new(tree.subsets(tree.root));
        let surviving = Configuration::new(meta_input, vec![0, 2]).unwrap();
        tree.prune(tree.root, &surviving);

        let remaining: Vec<&str> = tree.nodes[tree.root]
            .children
            .iter()
            .filter(|&&c| tree.exists.contains(c))
            .map(|&c| tree.nodes[c].name.as_str())
            .collect();
        assert_eq!(remaining, vec!["a", "c"]);
    }
}
