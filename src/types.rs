/// A complete log line attributed to the pod that produced it.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub pod_name: String,
    pub line: String,
}
