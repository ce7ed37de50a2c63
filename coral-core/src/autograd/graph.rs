use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use log::{debug, trace, warn};

use crate::error::CoralError;
use crate::ops::reduce_to_shape;
use crate::tensor::inplace_ops::add_into;
use crate::variable::{NodeState, Variable, VariableData};

/// Runs reverse-mode differentiation from the scalar `root`.
///
/// The root's gradient is seeded with 1. A node propagates to its inputs
/// only once every consumer built on it has handed over its contribution,
/// which is tracked by the node's pending-consumer count: each propagated
/// edge decrements the input's count and the input joins the worklist when
/// it reaches zero. Shared sub-expressions are therefore visited exactly
/// once, with their gradient complete.
///
/// Contributions are reduced to the input's shape and *added* to its
/// gradient, so leaves accumulate across passes until
/// [`Variable::zero_grad`] is called.
///
/// # Errors
/// - `NotScalar` if the root holds more than one entry.
/// - `GraphConsumed` if the root, or any node reachable from it, has
///   already propagated in an earlier pass. Nothing is written in that case.
pub fn backward(root: &Variable) -> Result<(), CoralError> {
    {
        let data = root.0.borrow();
        if !data.value.is_scalar() {
            return Err(CoralError::NotScalar {
                shape: data.value.dims().to_vec(),
            });
        }
        if data.pending_consumers > 0 {
            warn!(
                "backward from a node with {} pending consumer(s); its gradient is seeded, not accumulated",
                data.pending_consumers
            );
        }
    }
    ensure_unconsumed(root)?;

    root.grad().set_to_scalar(1.0);
    debug!("backward: start from root of shape {:?}", root.dims());

    let mut worklist = vec![root.clone()];
    let mut nodes = 0usize;
    let mut edges = 0usize;
    while let Some(node) = worklist.pop() {
        nodes += 1;
        let args = node.0.borrow().args.clone();
        // every contribution is computed before the first gradient write
        let contributions = args
            .iter()
            .map(|arg| reduce_to_shape(&arg.contribution(&node)?, &arg.input.shape()))
            .collect::<Result<Vec<_>, _>>()?;
        for (arg, reduced) in args.iter().zip(&contributions) {
            let input = &arg.input;
            add_into(&input.grad(), reduced)?;
            edges += 1;

            let remaining = {
                let mut input_data = input.0.borrow_mut();
                input_data.pending_consumers = input_data.pending_consumers.saturating_sub(1);
                input_data.pending_consumers
            };
            trace!(
                "backward: edge into {:?} ({:?}), {} consumer(s) left",
                input.dims(),
                arg.grad_fn,
                remaining
            );
            if remaining == 0 {
                worklist.push(input.clone());
            }
        }
        if !args.is_empty() {
            node.0.borrow_mut().state = NodeState::Propagated;
        }
    }
    debug!("backward: done, {} node(s) visited over {} edge(s)", nodes, edges);
    Ok(())
}

/// Walks every node reachable from `root` and fails with `GraphConsumed` if
/// one of them already propagated. Leaves never change state.
fn ensure_unconsumed(root: &Variable) -> Result<(), CoralError> {
    let mut visited: HashSet<*const RefCell<VariableData>> = HashSet::new();
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if !visited.insert(Rc::as_ptr(&node.0)) {
            continue;
        }
        let data = node.0.borrow();
        if data.state == NodeState::Propagated {
            return Err(CoralError::GraphConsumed);
        }
        stack.extend(data.args.iter().map(|arg| arg.input.clone()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
