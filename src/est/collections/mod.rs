/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

pub mod delay_line;
pub mod ring_buffer;
pub mod sliding_extremum;
