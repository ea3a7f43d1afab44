mod pipeline;
mod presets;
mod retargeting;
