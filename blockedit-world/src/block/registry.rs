use std::collections::HashMap;

/// Canonical metadata for one vanilla block id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub id: i32,
    pub name: &'static str,
    pub display_name: &'static str,
}

/// The built-in block table. Id 36 (the piston moving-block technical id)
/// is deliberately absent.
const VANILLA_BLOCKS: &[BlockType] = &[
    BlockType { id: 0, name: "minecraft:air", display_name: "Air" },
    BlockType { id: 1, name: "minecraft:stone", display_name: "Stone" },
    BlockType { id: 2, name: "minecraft:grass", display_name: "Grass Block" },
    BlockType { id: 3, name: "minecraft:dirt", display_name: "Dirt" },
    BlockType { id: 4, name: "minecraft:cobblestone", display_name: "Cobblestone" },
    BlockType { id: 5, name: "minecraft:planks", display_name: "Wood Plank" },
    BlockType { id: 6, name: "minecraft:sapling", display_name: "Sapling" },
    BlockType { id: 7, name: "minecraft:bedrock", display_name: "Bedrock" },
    BlockType { id: 8, name: "minecraft:flowing_water", display_name: "Flowing Water" },
    BlockType { id: 9, name: "minecraft:water", display_name: "Still Water" },
    BlockType { id: 10, name: "minecraft:flowing_lava", display_name: "Flowing Lava" },
    BlockType { id: 11, name: "minecraft:lava", display_name: "Still Lava" },
    BlockType { id: 12, name: "minecraft:sand", display_name: "Sand" },
    BlockType { id: 13, name: "minecraft:gravel", display_name: "Gravel" },
    BlockType { id: 14, name: "minecraft:gold_ore", display_name: "Gold Ore" },
    BlockType { id: 15, name: "minecraft:iron_ore", display_name: "Iron Ore" },
    BlockType { id: 16, name: "minecraft:coal_ore", display_name: "Coal Ore" },
    BlockType { id: 17, name: "minecraft:log", display_name: "Oak Wood" },
    BlockType { id: 18, name: "minecraft:leaves", display_name: "Oak Leaves" },
    BlockType { id: 19, name: "minecraft:sponge", display_name: "Sponge" },
    BlockType { id: 20, name: "minecraft:glass", display_name: "Glass" },
    BlockType { id: 21, name: "minecraft:lapis_ore", display_name: "Lapis Lazuli Ore" },
    BlockType { id: 22, name: "minecraft:lapis_block", display_name: "Lapis Lazuli Block" },
    BlockType { id: 23, name: "minecraft:dispenser", display_name: "Dispenser" },
    BlockType { id: 24, name: "minecraft:sandstone", display_name: "Sandstone" },
    BlockType { id: 25, name: "minecraft:noteblock", display_name: "Note Block" },
    BlockType { id: 26, name: "minecraft:bed", display_name: "Bed" },
    BlockType { id: 27, name: "minecraft:golden_rail", display_name: "Powered Rail" },
    BlockType { id: 28, name: "minecraft:detector_rail", display_name: "Detector Rail" },
    BlockType { id: 29, name: "minecraft:sticky_piston", display_name: "Sticky Piston" },
    BlockType { id: 30, name: "minecraft:cobweb", display_name: "Cobweb" },
    BlockType { id: 31, name: "minecraft:tallgrass", display_name: "Dead Shrub" },
    BlockType { id: 32, name: "minecraft:deadbush", display_name: "Dead Bush" },
    BlockType { id: 33, name: "minecraft:piston", display_name: "Piston" },
    BlockType { id: 34, name: "minecraft:piston_head", display_name: "Piston Head" },
    BlockType { id: 35, name: "minecraft:wool", display_name: "Wool" },
    BlockType { id: 37, name: "minecraft:yellow_flower", display_name: "Dandelion" },
    BlockType { id: 38, name: "minecraft:red_flower", display_name: "Poppy" },
    BlockType { id: 39, name: "minecraft:brown_mushroom", display_name: "Brown Mushroom" },
    BlockType { id: 40, name: "minecraft:red_mushroom", display_name: "Red Mushroom" },
    BlockType { id: 41, name: "minecraft:gold_block", display_name: "Gold Block" },
    BlockType { id: 42, name: "minecraft:iron_block", display_name: "Iron Block" },
    BlockType { id: 43, name: "minecraft:double_stone_slab", display_name: "Double Stone Slab" },
    BlockType { id: 44, name: "minecraft:stone_slab", display_name: "Stone Slab" },
    BlockType { id: 45, name: "minecraft:brick_block", display_name: "Bricks" },
    BlockType { id: 46, name: "minecraft:tnt", display_name: "TNT" },
    BlockType { id: 47, name: "minecraft:bookshelf", display_name: "Bookshelf" },
    BlockType { id: 48, name: "minecraft:mossy_cobblestone", display_name: "Moss Stone" },
    BlockType { id: 49, name: "minecraft:obsidian", display_name: "Obsidian" },
    BlockType { id: 50, name: "minecraft:torch", display_name: "Torch" },
    BlockType { id: 51, name: "minecraft:fire", display_name: "Fire" },
    BlockType { id: 52, name: "minecraft:mob_spawner", display_name: "Monster Spawner" },
    BlockType { id: 53, name: "minecraft:oak_stairs", display_name: "Oak Wood Stairs" },
    BlockType { id: 54, name: "minecraft:chest", display_name: "Chest" },
    BlockType { id: 55, name: "minecraft:redstone_wire", display_name: "Redstone Wire" },
    BlockType { id: 56, name: "minecraft:diamond_ore", display_name: "Diamond Ore" },
    BlockType { id: 57, name: "minecraft:diamond_block", display_name: "Diamond Block" },
    BlockType { id: 58, name: "minecraft:crafting_table", display_name: "Crafting Table" },
    BlockType { id: 59, name: "minecraft:wheat", display_name: "Wheat" },
    BlockType { id: 60, name: "minecraft:farmland", display_name: "Farmland" },
];

/// Immutable id-to-metadata lookup, built once by the application bootstrap
/// and passed to whoever needs it.
///
/// An empty registry is valid: every lookup reports "not found" rather than
/// failing.
#[derive(Clone, Debug, Default)]
pub struct BlockRegistry {
    blocks: HashMap<i32, BlockType>,
}

impl BlockRegistry {
    /// A registry with no entries; lookups always miss.
    pub fn empty() -> Self {
        BlockRegistry::default()
    }

    /// The registry backed by the built-in vanilla table.
    pub fn vanilla() -> Self {
        BlockRegistry {
            blocks: VANILLA_BLOCKS
                .iter()
                .map(|block| (block.id, *block))
                .collect(),
        }
    }

    pub fn get(&self, id: i32) -> Option<&BlockType> {
        self.blocks.get(&id)
    }

    pub fn name(&self, id: i32) -> Option<&'static str> {
        self.get(id).map(|block| block.name)
    }

    pub fn display_name(&self, id: i32) -> Option<&'static str> {
        self.get(id).map(|block| block.display_name)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.blocks.values()
    }
}
