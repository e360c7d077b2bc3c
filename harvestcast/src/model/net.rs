//! Two-branch harvest regression network
//!
//! Branch A is a single dense layer over the numeric growth features.
//! Branch B is a small convolutional stack over the field image. The
//! branches are concatenated into one linear output unit that regresses
//! the predicted number of days until harvest.

use burn::{
    config::Config,
    module::Module,
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
        Linear, LinearConfig, PaddingConfig2d, Relu,
    },
    tensor::{backend::Backend, Tensor},
};

/// Configuration for the HarvestNet model
#[derive(Config, Debug)]
pub struct HarvestNetConfig {
    /// Number of numeric input features
    #[config(default = "6")]
    pub num_features: usize,

    /// Input image size (assumes square images)
    #[config(default = "128")]
    pub image_size: usize,

    /// Number of input channels (3 for RGB)
    #[config(default = "3")]
    pub in_channels: usize,

    /// Number of convolutional filters in the image branch
    #[config(default = "32")]
    pub conv_filters: usize,

    /// Number of units in the dense feature branch
    #[config(default = "64")]
    pub dense_units: usize,
}

impl HarvestNetConfig {
    /// Size of the flattened image branch after conv (valid padding, 3x3
    /// kernel) and 2x2 max pooling
    pub fn flattened_conv_dim(&self) -> usize {
        let conv_out = self.image_size - 2;
        let pooled = conv_out / 2;
        self.conv_filters * pooled * pooled
    }

    /// Initialize a HarvestNet from this configuration
    pub fn init<B: Backend>(&self, device: &B::Device) -> HarvestNet<B> {
        let tabular = LinearConfig::new(self.num_features, self.dense_units).init(device);

        let conv = Conv2dConfig::new([self.in_channels, self.conv_filters], [3, 3])
            .with_padding(PaddingConfig2d::Valid)
            .init(device);
        let pool = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();

        let output = LinearConfig::new(self.dense_units + self.flattened_conv_dim(), 1).init(device);

        HarvestNet {
            tabular,
            conv,
            pool,
            relu: Relu::new(),
            output,
        }
    }
}

/// Harvest date regression network
#[derive(Module, Debug)]
pub struct HarvestNet<B: Backend> {
    tabular: Linear<B>,
    conv: Conv2d<B>,
    pool: MaxPool2d,
    relu: Relu,
    output: Linear<B>,
}

impl<B: Backend> HarvestNet<B> {
    /// Forward pass through the network
    ///
    /// # Arguments
    /// * `features` - Numeric tensor of shape [batch_size, num_features]
    /// * `images` - Image tensor of shape [batch_size, 3, height, width]
    ///
    /// # Returns
    /// * Predicted harvest days tensor of shape [batch_size, 1]
    pub fn forward(&self, features: Tensor<B, 2>, images: Tensor<B, 4>) -> Tensor<B, 2> {
        // Dense branch over the growth features
        let tab = self.tabular.forward(features);
        let tab = self.relu.forward(tab);

        // Convolutional branch over the field image
        let img = self.conv.forward(images);
        let img = self.relu.forward(img);
        let img = self.pool.forward(img);
        let img: Tensor<B, 2> = img.flatten(1, 3);

        let joined = Tensor::cat(vec![tab, img], 1);
        self.output.forward(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InferenceBackend;

    type TestBackend = InferenceBackend;

    #[test]
    fn test_flattened_conv_dim() {
        let config = HarvestNetConfig::new();
        // 128 -> conv(valid, 3x3) -> 126 -> pool(2x2) -> 63
        assert_eq!(config.flattened_conv_dim(), 32 * 63 * 63);
    }

    #[test]
    fn test_harvest_net_output_shape() {
        let device = Default::default();
        let config = HarvestNetConfig::new().with_image_size(64);
        let model = config.init::<TestBackend>(&device);

        let features = Tensor::<TestBackend, 2>::zeros([2, 6], &device);
        let images = Tensor::<TestBackend, 4>::zeros([2, 3, 64, 64], &device);

        let output = model.forward(features, images);
        assert_eq!(output.dims(), [2, 1]);
    }
}
