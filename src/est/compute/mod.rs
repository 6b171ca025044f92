/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

pub mod batch;
pub mod estimator;
pub mod indicator;
pub mod operators;
