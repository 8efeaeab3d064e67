mod controls;
mod panels;
mod status;
