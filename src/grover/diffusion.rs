use super::{
    layout::RegisterLayout,
    operator::{Gate, Operator},
};

/// Inversion about the mean on the move-index register, `a' = 2 * mean - a`,
/// with the identity on every other register
pub fn diffusion_operator(layout: &RegisterLayout) -> Operator {
    Operator::new("diffuse", vec![Gate::MeanInversion {
        offset: 0,
        width: layout.move_bits,
    }])
}
