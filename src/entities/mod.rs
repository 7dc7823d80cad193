pub mod city;
pub mod point_of_interest;
