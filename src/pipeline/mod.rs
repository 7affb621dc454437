pub mod stage1_group;
pub mod stage2_select;
pub mod stage3_evaluate;
pub mod stage4_report;
