/// Rotation matrices applied to marker rows (row vector times matrix).

/// Rotation about the vertical axis carrying the Y axis onto X.
pub const Y_TO_X_ROTATION: [[f64; 3]; 3] = [
    [0.0, -1.0, 0.0], // x contributes -1 to y'
    [1.0, 0.0, 0.0],  // y contributes to x'
    [0.0, 0.0, 1.0],  // z unchanged
];

/// Rotation about X turning a Y-up lab into a Z-up lab.
pub const Y_TO_Z_ROTATION: [[f64; 3]; 3] = [
    [1.0, 0.0, 0.0],  // x unchanged
    [0.0, 0.0, 1.0],  // y contributes to z'
    [0.0, -1.0, 0.0], // z contributes -1 to y'
];

/// Multiply a coordinate row by a 3x3 matrix: `out[j] = sum_i row[i] * m[i][j]`.
pub fn rotate_row(row: [f64; 3], matrix: &[[f64; 3]; 3]) -> [f64; 3] {
    let mut output = [0.0; 3];

    for j in 0..3 {
        for i in 0..3 {
            output[j] += row[i] * matrix[i][j];
        }
    }

    output
}
