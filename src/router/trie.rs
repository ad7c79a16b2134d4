use super::record::Record;
use crate::pattern::{Bound, Segment};

use std::collections::HashMap;
use std::sync::Arc;

use smallvec::SmallVec;

type NodeId = usize;

pub(crate) type Captures<'p> = SmallVec<[&'p str; 8]>;

/// Append-only segment trie. Nodes live in an arena and reference each
/// other by index; the root is node 0.
#[derive(Debug)]
pub(crate) struct Trie<T> {
    nodes: Vec<Node<T>>,
}

#[derive(Debug)]
struct Node<T> {
    literal: HashMap<Box<str>, NodeId>,
    mixed: Vec<MixedEdge>,
    param: Option<NodeId>,
    param_empty: Option<NodeId>,
    wildcard: Vec<(Bound, NodeId)>,
    terminal: Option<Arc<Record<T>>>,
}

#[derive(Debug)]
struct MixedEdge {
    regex: regex::Regex,
    child: NodeId,
}

/// Branch categories in lookup priority order. A frame advances
/// through them as earlier choices dead-end deeper in the tree.
#[derive(Debug, Clone, Copy)]
enum Step {
    Literal,
    Mixed(usize),
    Param,
    ParamEmpty,
    Wildcard(usize),
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    seg: usize,
    step: Step,
    caps: usize,
}

impl<T> Node<T> {
    fn empty() -> Self {
        Self {
            literal: HashMap::new(),
            mixed: Vec::new(),
            param: None,
            param_empty: None,
            wildcard: Vec::new(),
            terminal: None,
        }
    }
}

impl<T> Trie<T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::empty()],
        }
    }

    fn fresh(&mut self) -> NodeId {
        self.nodes.push(Node::empty());
        self.nodes.len() - 1
    }

    /// Registers a descriptor sequence. The first record to claim a
    /// node's terminal keeps it: registration order is priority.
    ///
    /// A trailing allow-empty parameter also registers the sequence
    /// minus its final descriptor, so the parameter can be omitted
    /// entirely rather than only matched as an empty segment.
    pub(crate) fn add(&mut self, segments: &[Segment], record: &Arc<Record<T>>) {
        let mut node = 0;

        for segment in segments {
            node = match segment {
                Segment::Literal(text) => match self.nodes[node].literal.get(text) {
                    Some(&child) => child,
                    None => {
                        let child = self.fresh();
                        self.nodes[node].literal.insert(text.clone(), child);
                        child
                    }
                },
                Segment::Param { allow_empty: false } => match self.nodes[node].param {
                    Some(child) => child,
                    None => {
                        let child = self.fresh();
                        self.nodes[node].param = Some(child);
                        child
                    }
                },
                Segment::Param { allow_empty: true } => match self.nodes[node].param_empty {
                    Some(child) => child,
                    None => {
                        let child = self.fresh();
                        self.nodes[node].param_empty = Some(child);
                        child
                    }
                },
                Segment::Mixed { regex, .. } => {
                    let found = self.nodes[node]
                        .mixed
                        .iter()
                        .find(|edge| edge.regex.as_str() == regex.as_str())
                        .map(|edge| edge.child);
                    match found {
                        Some(child) => child,
                        None => {
                            let child = self.fresh();
                            self.nodes[node].mixed.push(MixedEdge {
                                regex: regex.clone(),
                                child,
                            });
                            child
                        }
                    }
                }
                Segment::Wildcard(bound) => {
                    let found = self.nodes[node]
                        .wildcard
                        .iter()
                        .find(|(b, _)| b == bound)
                        .map(|(_, child)| *child);
                    match found {
                        Some(child) => child,
                        None => {
                            let child = self.fresh();
                            self.nodes[node].wildcard.push((*bound, child));
                            child
                        }
                    }
                }
            };
        }

        let terminal = &mut self.nodes[node].terminal;
        if terminal.is_none() {
            *terminal = Some(Arc::clone(record));
        }

        if segments.last().map_or(false, Segment::is_trailing_optional) {
            self.add(&segments[..segments.len() - 1], record);
        }
    }

    /// Depth-first search with explicit backtracking. A locally valid
    /// branch can still fail deeper in the tree, so each node retries
    /// the next branch category after a dead end.
    ///
    /// Returns the matched record and the raw captured text per
    /// consumed parameter slot, in traversal order.
    pub(crate) fn lookup<'r, 'p>(
        &'r self,
        path: &'p str,
        segments: &[&'p str],
        case_sensitive: bool,
    ) -> Option<(&'r Arc<Record<T>>, Captures<'p>)> {
        let mut captures: Captures<'p> = SmallVec::new();
        let mut stack: SmallVec<[Frame; 8]> = SmallVec::new();
        stack.push(Frame {
            node: 0,
            seg: 0,
            step: Step::Literal,
            caps: 0,
        });

        while !stack.is_empty() {
            let top = stack.len() - 1;
            let frame = stack[top];
            let node = &self.nodes[frame.node];

            if frame.seg == segments.len() {
                if let Some(record) = &node.terminal {
                    return Some((record, captures));
                }
                stack.pop();
                continue;
            }

            // Discard captures pushed by this frame's previous branch.
            captures.truncate(frame.caps);
            let seg = segments[frame.seg];

            let next = match frame.step {
                Step::Literal => {
                    stack[top].step = Step::Mixed(0);
                    let child = if case_sensitive {
                        node.literal.get(seg)
                    } else {
                        node.literal.get(seg.to_lowercase().as_str())
                    };
                    child.map(|&child| (child, frame.seg + 1))
                }
                Step::Mixed(i) if i < node.mixed.len() => {
                    stack[top].step = Step::Mixed(i + 1);
                    let edge = &node.mixed[i];
                    edge.regex.captures(seg).map(|groups| {
                        for group in groups.iter().skip(1).flatten() {
                            captures.push(group.as_str());
                        }
                        (edge.child, frame.seg + 1)
                    })
                }
                Step::Mixed(_) => {
                    stack[top].step = Step::Param;
                    None
                }
                Step::Param => {
                    stack[top].step = Step::ParamEmpty;
                    match node.param {
                        Some(child) if !seg.is_empty() => {
                            captures.push(seg);
                            Some((child, frame.seg + 1))
                        }
                        _ => None,
                    }
                }
                Step::ParamEmpty => {
                    stack[top].step = Step::Wildcard(0);
                    // An allow-empty parameter accepts non-empty text
                    // as well; it merely also accepts empty.
                    node.param_empty.map(|child| {
                        captures.push(seg);
                        (child, frame.seg + 1)
                    })
                }
                Step::Wildcard(i) if i < node.wildcard.len() => {
                    stack[top].step = Step::Wildcard(i + 1);
                    let (bound, child) = node.wildcard[i];
                    match bound {
                        Bound::Fixed(n) => {
                            if segments.len() - frame.seg >= n {
                                for s in &segments[frame.seg..frame.seg + n] {
                                    captures.push(s);
                                }
                                Some((child, frame.seg + n))
                            } else {
                                None
                            }
                        }
                        Bound::Unbounded => {
                            captures.push(tail(path, seg));
                            Some((child, segments.len()))
                        }
                    }
                }
                Step::Wildcard(_) => {
                    stack.pop();
                    continue;
                }
            };

            if let Some((child, seg)) = next {
                stack.push(Frame {
                    node: child,
                    seg,
                    step: Step::Literal,
                    caps: captures.len(),
                });
            }
        }

        None
    }
}

/// Slice of `path` from the start of `seg` to the end. `seg` must be a
/// subslice of `path`.
fn tail<'p>(path: &'p str, seg: &'p str) -> &'p str {
    let offset = seg.as_ptr() as usize - path.as_ptr() as usize;
    &path[offset..]
}
