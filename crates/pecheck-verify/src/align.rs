//! Moving measured qubits onto the low indices.

use pecheck_ir::{Circuit, IrResult, QubitId};
use tracing::trace;

use crate::scanner::next_garbage;

/// Swap every measured qubit at an index `>= m` into the lowest unused
/// garbage slot, identically in both circuits.
///
/// Only the indices below `min(n1, n2)` are scanned and `garbage` (the
/// first circuit's mask) alone decides which qubits move. Swaps are
/// appended as gates, so they relabel the outputs and leave the inputs in
/// place. Masks are not updated. Returns the number of swaps per circuit.
pub fn align_qubits(
    c1: &mut Circuit,
    c2: &mut Circuit,
    garbage: &[bool],
    m: usize,
) -> IrResult<usize> {
    let k = c1.num_qubits().min(c2.num_qubits()).min(garbage.len());
    let mut slot = next_garbage(0, garbage);
    let mut swaps = 0;

    for i in (m..k).rev() {
        if garbage[i] {
            continue;
        }
        let (from, to) = (QubitId(i as u32), QubitId(slot as u32));
        c1.swap(from, to)?;
        c2.swap(from, to)?;
        trace!(%from, %to, "moved measured qubit");

        slot = next_garbage(slot + 1, garbage);
        swaps += 1;
    }

    Ok(swaps)
}
