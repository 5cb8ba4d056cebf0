use std::collections::BTreeSet;

use nalgebra::DMatrix;

use crate::error::{Result, TreeError};

/// Confusion matrix together with the label of each row and column.
pub type ConfusionMatrix = (Vec<String>, DMatrix<usize>);

pub trait ClassificationMetrics {
    /// Computes the confusion matrix of predicted against true labels.
    ///
    /// Rows are indexed by the true label and columns by the predicted label,
    /// both in sorted label order.
    ///
    /// # Errors
    ///
    /// Returns an error if the label slices are empty or differ in length.
    fn confusion_matrix(&self, y_true: &[String], y_pred: &[String]) -> Result<ConfusionMatrix> {
        if y_true.len() != y_pred.len() {
            return Err(TreeError::InvalidParameter(
                "Predictions and labels are of different sizes.".into(),
            ));
        }
        if y_true.is_empty() {
            return Err(TreeError::InvalidParameter("No labels to compare.".into()));
        }

        let classes: Vec<String> = y_true
            .iter()
            .chain(y_pred)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut matrix = DMatrix::zeros(classes.len(), classes.len());
        for (y_t, y_p) in y_true.iter().zip(y_pred) {
            // both searches succeed: every label was inserted into `classes`
            if let (Ok(row), Ok(col)) = (classes.binary_search(y_t), classes.binary_search(y_p)) {
                matrix[(row, col)] += 1;
            }
        }

        Ok((classes, matrix))
    }

    /// Fraction of predictions equal to the true label.
    fn accuracy(&self, y_true: &[String], y_pred: &[String]) -> Result<f64> {
        let (_, matrix) = self.confusion_matrix(y_true, y_pred)?;
        let correct: usize = matrix.diagonal().iter().sum();
        Ok(correct as f64 / y_true.len() as f64)
    }
}
