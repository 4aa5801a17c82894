use serde::Deserialize;
use std::fmt;

/// Everything the pipeline API reports at one point in time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PipelineSnapshot {
    pub inputs: Vec<FileEntry>,
    pub outputs: Vec<FileEntry>,
    pub pipeline_status: Vec<StageStatus>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileEntry {
    pub filename: String,
    #[serde(rename = "type")]
    pub file_type: String, // format label, e.g. "FASTQ", "BAM"
    pub size: FileSize,
}

/// File size as the server sent it. The unit is not part of the
/// payload contract, so nothing here tries to interpret it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FileSize {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StageStatus {
    pub stage: String,
    pub status: String,
}

impl PipelineSnapshot {
    /// Decode a response body. Missing keys and wrong types are errors;
    /// unknown keys are ignored.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSize::Text(s) => f.write_str(s),
            // Integral floats print without a trailing ".0", so `1e3` shows as `1000`
            FileSize::Number(n) => match n.as_f64() {
                Some(x) if n.is_f64() => write!(f, "{}", x),
                _ => write!(f, "{}", n),
            },
        }
    }
}

impl FileEntry {
    /// `filename (type, size)`
    pub fn label(&self) -> String {
        format!("{} ({}, {})", self.filename, self.file_type, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_snapshot() {
        let body = br#"{
            "inputs": [{"filename": "sample.fastq", "type": "FASTQ", "size": "2.1GB"}],
            "outputs": [],
            "pipeline_status": [
                {"stage": "Alignment", "status": "Complete"},
                {"stage": "Variant Calling", "status": "Running"}
            ]
        }"#;

        let snapshot = PipelineSnapshot::from_json(body).unwrap();
        assert_eq!(snapshot.inputs.len(), 1);
        assert_eq!(snapshot.inputs[0].file_type, "FASTQ");
        assert!(snapshot.outputs.is_empty());
        assert_eq!(snapshot.pipeline_status[1].stage, "Variant Calling");
    }

    #[test]
    fn test_numeric_size_display() {
        let body = br#"{
            "inputs": [
                {"filename": "a.bam", "type": "BAM", "size": 1024},
                {"filename": "b.vcf", "type": "VCF", "size": 2.5}
            ],
            "outputs": [],
            "pipeline_status": []
        }"#;

        let snapshot = PipelineSnapshot::from_json(body).unwrap();
        assert_eq!(snapshot.inputs[0].label(), "a.bam (BAM, 1024)");
        assert_eq!(snapshot.inputs[1].label(), "b.vcf (VCF, 2.5)");
    }

    #[test]
    fn test_float_sizes_display_like_numbers() {
        let body = br#"{
            "inputs": [
                {"filename": "a", "type": "BAM", "size": 1.0},
                {"filename": "b", "type": "BAM", "size": 1e3},
                {"filename": "c", "type": "BAM", "size": 2.50},
                {"filename": "d", "type": "BAM", "size": -4}
            ],
            "outputs": [],
            "pipeline_status": []
        }"#;

        let snapshot = PipelineSnapshot::from_json(body).unwrap();
        let labels: Vec<String> = snapshot.inputs.iter().map(FileEntry::label).collect();
        assert_eq!(
            labels,
            vec!["a (BAM, 1)", "b (BAM, 1000)", "c (BAM, 2.5)", "d (BAM, -4)"]
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let body = br#"{
            "inputs": [],
            "outputs": [{"filename": "out.vcf", "type": "VCF", "size": "12MB", "checksum": "abc"}],
            "pipeline_status": [],
            "generated_at": "2024-01-01T00:00:00Z"
        }"#;

        let snapshot = PipelineSnapshot::from_json(body).unwrap();
        assert_eq!(snapshot.outputs[0].label(), "out.vcf (VCF, 12MB)");
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let body = br#"{"inputs": [], "outputs": []}"#;
        assert!(PipelineSnapshot::from_json(body).is_err());
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let body = br#"{"inputs": [{"filename": "x", "type": "FASTQ", "size": null}], "outputs": [], "pipeline_status": []}"#;
        assert!(PipelineSnapshot::from_json(body).is_err());

        assert!(PipelineSnapshot::from_json(b"not json").is_err());
    }
}
