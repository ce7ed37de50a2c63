// src/variable/mod.rs

use std::cell::RefCell;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::rc::Rc;

use log::warn;

use crate::autograd::backward_op::DiffArg;
use crate::autograd::graph;
use crate::buffer::Entry;
use crate::error::CoralError;
use crate::shape::Shape;
use crate::tensor::{self, Tensor};

pub mod ops;

/// Progress of a non-leaf node through the reverse pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Waiting for consumers to hand over their contributions.
    Accumulating,
    /// Has pushed its gradient to its inputs. Its pending counts are spent.
    Propagated,
}

/// Internal state of a graph node.
pub struct VariableData {
    pub(crate) value: Tensor,
    pub(crate) grad: Tensor,
    /// Edges back to the inputs this node was computed from. Empty for leaves.
    pub(crate) args: Vec<DiffArg>,
    /// Number of live edges from consumers that have not yet propagated.
    pub(crate) pending_consumers: usize,
    pub(crate) state: NodeState,
}

/// Withdraws this node's edges if it is released before propagating, so a
/// discarded branch does not keep its inputs waiting forever.
impl Drop for VariableData {
    fn drop(&mut self) {
        if self.state == NodeState::Propagated {
            return;
        }
        for arg in &self.args {
            match arg.input.0.try_borrow_mut() {
                Ok(mut input) => {
                    input.pending_consumers = input.pending_consumers.saturating_sub(1);
                }
                Err(_) => warn!(
                    "dropped node could not release its edge into an input that is borrowed; \
                     the input keeps a pending consumer"
                ),
            }
        }
    }
}

/// A node of the computation graph: a value, its gradient, and how it was
/// produced.
///
/// `Variable` is a cheap handle; clones refer to the same node. Nodes hold
/// strong handles to their inputs, so a graph stays alive as long as any of
/// its outputs does.
///
/// Leaves are built with the constructors below. Every differentiable op in
/// [`ops`] returns a new non-leaf node and registers one pending consumer on
/// each input per edge.
#[derive(Clone)]
pub struct Variable(pub(crate) Rc<RefCell<VariableData>>);

impl Variable {
    /// Leaf with a zero value of shape `dims` and a zero gradient.
    pub fn new(dims: &[usize]) -> Result<Self, CoralError> {
        Ok(Self::from_tensor(tensor::zeros(dims)?))
    }

    /// Leaf wrapping `value`. The gradient is a zero tensor of the same shape.
    pub fn from_tensor(value: Tensor) -> Self {
        Self::from_parts(value, Vec::new())
    }

    /// Leaf filled with `value`.
    pub fn full(dims: &[usize], value: Entry) -> Result<Self, CoralError> {
        Ok(Self::from_tensor(tensor::full(dims, value)?))
    }

    /// Leaf with entries drawn uniformly from `[0, 1)`.
    pub fn rand(dims: &[usize]) -> Result<Self, CoralError> {
        Ok(Self::from_tensor(tensor::rand(dims)?))
    }

    /// Leaf with entries drawn from the standard normal distribution.
    pub fn randn(dims: &[usize]) -> Result<Self, CoralError> {
        Ok(Self::from_tensor(tensor::randn(dims)?))
    }

    /// New leaf with this variable's shape, every entry set to `value`.
    pub fn new_like_with_value(&self, value: Entry) -> Self {
        Self::from_tensor(tensor::create::full_like(&self.value(), value))
    }

    /// New leaf holding a deep copy of this variable's value. The graph is
    /// not copied.
    pub fn copy(&self) -> Self {
        Self::from_tensor(self.value().copy())
    }

    /// New leaf whose value is a view of this variable's storage under
    /// `dims`. Writes through either are visible to both.
    pub fn view_as(&self, dims: &[usize]) -> Result<Self, CoralError> {
        Ok(Self::from_tensor(self.value().view_as(dims)?))
    }

    /// Builds an op output and registers one pending consumer per edge.
    pub(crate) fn from_op(value: Tensor, args: Vec<DiffArg>) -> Self {
        for arg in &args {
            arg.input.0.borrow_mut().pending_consumers += 1;
        }
        Self::from_parts(value, args)
    }

    fn from_parts(value: Tensor, args: Vec<DiffArg>) -> Self {
        let grad = tensor::zeros_like(&value);
        Variable(Rc::new(RefCell::new(VariableData {
            value,
            grad,
            args,
            pending_consumers: 0,
            state: NodeState::Accumulating,
        })))
    }

    // --- Introspection ---

    /// Handle to the value tensor (shares storage).
    pub fn value(&self) -> Tensor {
        self.0.borrow().value.clone()
    }

    /// Handle to the gradient tensor (shares storage).
    pub fn grad(&self) -> Tensor {
        self.0.borrow().grad.clone()
    }

    pub fn shape(&self) -> Shape {
        self.0.borrow().value.shape().clone()
    }

    pub fn dims(&self) -> Vec<usize> {
        self.0.borrow().value.dims().to_vec()
    }

    /// Value entry at a flat row-major index.
    pub fn entry_at(&self, index: usize) -> Result<Entry, CoralError> {
        self.0.borrow().value.get(index)
    }

    pub fn is_leaf(&self) -> bool {
        self.0.borrow().args.is_empty()
    }

    /// Number of consumer edges that still have to propagate into this node.
    pub fn pending_consumers(&self) -> usize {
        self.0.borrow().pending_consumers
    }

    pub fn state(&self) -> NodeState {
        self.0.borrow().state
    }

    /// Edges back to this node's inputs, in operand order.
    pub fn args(&self) -> Vec<DiffArg> {
        self.0.borrow().args.clone()
    }

    /// True iff both variables hold equal values, ignoring graph state.
    pub fn values_equal(&self, other: &Variable) -> bool {
        tensor::tensors_equal(&self.value(), &other.value())
    }

    /// True iff both values are views of the same storage.
    pub fn aliases(&self, other: &Variable) -> bool {
        tensor::shares_storage(&self.value(), &other.value())
    }

    // --- Mutation ---

    pub fn set_to_scalar(&self, value: Entry) {
        self.0.borrow().value.set_to_scalar(value);
    }

    pub fn set_to_index_fn<F>(&self, index_fn: F)
    where
        F: Fn(usize) -> Entry,
    {
        self.0.borrow().value.set_to_index_fn(index_fn);
    }

    pub fn set_entry(&self, index: usize, value: Entry) -> Result<(), CoralError> {
        self.0.borrow().value.set(index, value)
    }

    /// Reinterprets the value and gradient under `dims` in place.
    ///
    /// # Errors
    /// `InvalidShape` if the size changes, or if the variable is wired into
    /// a graph (an op output, or an input with consumers): the recorded
    /// edges rely on the shape it had when they were built.
    pub fn reinterpret(&self, dims: &[usize]) -> Result<(), CoralError> {
        let mut data = self.0.borrow_mut();
        if !data.args.is_empty() || data.pending_consumers > 0 {
            return Err(CoralError::InvalidShape {
                dims: dims.to_vec(),
                reason: "cannot reinterpret a variable that is part of a graph".to_string(),
            });
        }
        let shape = data.value.shape().reinterpret(dims)?;
        data.value.reinterpret(shape.dims())?;
        data.grad.reinterpret(shape.dims())?;
        Ok(())
    }

    /// Resets the gradient to zeros.
    pub fn zero_grad(&self) {
        self.0.borrow().grad.set_to_scalar(0.0);
    }

    /// Runs [`graph::backward`] from this variable.
    pub fn backward(&self) -> Result<(), CoralError> {
        graph::backward(self)
    }
}

impl Debug for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.0.try_borrow() {
            Ok(data) => f
                .debug_struct("Variable")
                .field("value", &data.value)
                .field("grad", &data.grad)
                .field("inputs", &data.args.len())
                .field("pending_consumers", &data.pending_consumers)
                .field("state", &data.state)
                .finish(),
            Err(_) => write!(f, "Variable(<borrowed>)"),
        }
    }
}
