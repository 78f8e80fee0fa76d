use crate::{
    error::RuntimeError,
    instruction::Instruction,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{f64_to_i64_truncated, resolve_index},
};

/// Pops the top `count` values off `stack`, in push order.
///
/// # Errors
/// Returns `RuntimeError::StackUnderflow` naming `instruction` when fewer
/// than `count` values are available.
pub fn pop_operands(stack: &mut Vec<Value>,
                    count: usize,
                    instruction: &Instruction)
                    -> EvalResult<Vec<Value>> {
    let start = stack.len()
                     .checked_sub(count)
                     .ok_or_else(|| RuntimeError::StackUnderflow { instruction: instruction.to_string() })?;
    Ok(stack.split_off(start))
}

/// Picks the elements of `target` at every element of `indices`.
///
/// All index values are flattened into one list of positions, each truncated
/// toward zero. Negative positions count from the end. Indexing an empty
/// value yields an empty value.
///
/// # Errors
/// `RuntimeError::InvalidIndex` for non-finite positions and
/// `RuntimeError::IndexOutOfBounds` for positions outside `target`.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::utils::index};
///
/// let v = Value::from([10.0, 20.0, 30.0]);
///
/// assert_eq!(index(&v, &[Value::scalar(1.0)]).unwrap(), Value::scalar(20.0));
/// assert_eq!(index(&v, &[Value::from([2.0, -3.0])]).unwrap(), Value::from([30.0, 10.0]));
/// assert!(index(&v, &[Value::scalar(3.0)]).is_err());
/// ```
pub fn index(target: &Value, indices: &[Value]) -> EvalResult<Value> {
    if target.is_empty() {
        return Ok(Value::empty());
    }

    let elements = target.as_slice();

    indices.iter()
           .flat_map(Value::iter)
           .map(|position| {
               let i = resolve_index(f64_to_i64_truncated(position)?, elements.len())?;
               Ok(elements[i])
           })
           .collect()
}

/// Slices `target` from `start` to `end`, both inclusive.
///
/// The first element of each bound is used. When `start` lies after `end`
/// the slice runs backwards. Any empty operand yields an empty value.
///
/// # Errors
/// Same as [`index`], for either bound.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::utils::index_range};
///
/// let v = Value::from([1.0, 2.0, 3.0, 4.0]);
///
/// let forward = index_range(&v, &Value::scalar(1.0), &Value::scalar(2.0)).unwrap();
/// assert_eq!(forward, Value::from([2.0, 3.0]));
///
/// let backward = index_range(&v, &Value::scalar(-1.0), &Value::scalar(0.0)).unwrap();
/// assert_eq!(backward, Value::from([4.0, 3.0, 2.0, 1.0]));
/// ```
pub fn index_range(target: &Value, start: &Value, end: &Value) -> EvalResult<Value> {
    let (Some(start), Some(end)) = (start.first(), end.first()) else {
        return Ok(Value::empty());
    };

    if target.is_empty() {
        return Ok(Value::empty());
    }

    let elements = target.as_slice();
    let from = resolve_index(f64_to_i64_truncated(start)?, elements.len())?;
    let to = resolve_index(f64_to_i64_truncated(end)?, elements.len())?;

    Ok(if from <= to {
        elements[from..=to].iter().copied().collect()
    } else {
        elements[to..=from].iter().rev().copied().collect()
    })
}
