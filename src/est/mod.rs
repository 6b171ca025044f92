/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

pub mod collections;
pub mod compute;
pub mod definitions;
pub mod error;
pub mod mode;
pub mod selector;
