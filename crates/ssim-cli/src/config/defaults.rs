pub struct DefaultsConfig {
    pub plot_width: u32,
    pub plot_height: u32,
    pub bandwidth: f64,
    pub violin_range: (f64, f64),
    pub distribution_range: (f64, f64),
    pub heatmap_bins: usize,
    pub cab_limits: (f64, f64),
    pub cab_label: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            plot_width: 1000,
            plot_height: 700,
            bandwidth: 0.2,
            violin_range: (-40.0, 0.0),
            distribution_range: (-10.0, 0.0),
            heatmap_bins: 30,
            cab_limits: (0.0, -10.0),
            cab_label: "APIvExp".to_string(),
        }
    }
}
