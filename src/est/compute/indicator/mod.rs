/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

pub mod bollinger_bands;
pub mod momentum;
pub mod oscillator;
mod stage;
pub mod stochastic;
